use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("found {headers} train headers but {tables} delay tables")]
    HeaderTableCount { headers: usize, tables: usize },

    #[error("unexpected page structure: {context}")]
    StructuralMismatch { context: String },

    #[error("{kind} text does not match the expected shape: {text:?}")]
    PatternMismatch { kind: PatternKind, text: String },

    #[error("train block #{index}: {source}")]
    InTrain {
        index: usize,
        #[source]
        source: Box<ExtractError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Denomination,
    Route,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::Denomination => f.write_str("denomination"),
            PatternKind::Route => f.write_str("route"),
        }
    }
}

impl ExtractError {
    pub fn structural(context: impl Into<String>) -> Self {
        ExtractError::StructuralMismatch {
            context: context.into(),
        }
    }

    pub fn pattern(kind: PatternKind, text: &str) -> Self {
        ExtractError::PatternMismatch {
            kind,
            text: text.to_string(),
        }
    }

    pub fn in_train(self, index: usize) -> Self {
        ExtractError::InTrain {
            index,
            source: Box::new(self),
        }
    }

    /// True when the page markup itself changed shape, as opposed to a
    /// single text field not matching its pattern.
    pub fn is_structural(&self) -> bool {
        match self {
            ExtractError::HeaderTableCount { .. } | ExtractError::StructuralMismatch { .. } => true,
            ExtractError::PatternMismatch { .. } => false,
            ExtractError::InTrain { source, .. } => source.is_structural(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_train_keeps_classification() {
        let err = ExtractError::structural("span #2 missing").in_train(4);
        assert!(err.is_structural());
        assert_eq!(
            err.to_string(),
            "train block #4: unexpected page structure: span #2 missing"
        );

        let err = ExtractError::pattern(PatternKind::Route, "garbage").in_train(0);
        assert!(!err.is_structural());
    }

    #[test]
    fn count_mismatch_message() {
        let err = ExtractError::HeaderTableCount { headers: 3, tables: 2 };
        assert!(err.is_structural());
        assert_eq!(err.to_string(), "found 3 train headers but 2 delay tables");
    }
}
