pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    build_prompt, classify_failure, error_state, DescribeModelUseCase, TextGenerator,
    EMPTY_QUERY_MESSAGE,
    EMPTY_RESPONSE_MESSAGE, FORBIDDEN_MESSAGE, GENERIC_FAILURE_MESSAGE, INVALID_KEY_MESSAGE,
    MISSING_KEY_MESSAGE, QUOTA_MESSAGE,
};

pub use connector::{GeminiClient, MockGenerator, Settings};

pub use domain::{DomainError, ViewState};
