use miette::Diagnostic;
use thiserror::Error;

/// Failures that stop the HTTP server itself.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(projects_api::api::bind),
        help("Is another process using this port? Set PORT to choose a different one.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(projects_api::api::serve))]
    Serve(#[source] std::io::Error),
}
