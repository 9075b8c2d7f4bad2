pub type TraitmixResult<T> = Result<T, TraitmixError>;

#[derive(thiserror::Error, Debug)]
pub enum TraitmixError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TraitmixError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TraitmixError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(TraitmixError::asset("x").to_string().contains("asset error:"));
        assert!(
            TraitmixError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            TraitmixError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TraitmixError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
