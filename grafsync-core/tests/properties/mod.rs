mod credential_tests;
mod document_tests;
mod summary_tests;
mod tracing_tests;
