//! Integration tests for Clementine.
//!
//! # Running Tests
//!
//! ```bash
//! # Start DynamoDB Local and the API
//! docker run -p 8000:8000 amazon/dynamodb-local
//! CLEMENTINE_TABLE=clementine-test DYNAMO_ENDPOINT_URL=http://localhost:8000 \
//!     cargo run -p clementine-cli -- table create
//! CLEMENTINE_TABLE=clementine-test DYNAMO_ENDPOINT_URL=http://localhost:8000 \
//!     cargo run -p clementine-api
//!
//! # Run integration tests
//! cargo test -p clementine-integration-tests -- --ignored
//! ```
//!
//! Tests live in `tests/` and talk to a running API over HTTP. The base
//! URL is configurable via `API_BASE_URL` (default
//! `http://localhost:3001`). Each test creates its own products, so runs
//! are independent even against a shared table.
