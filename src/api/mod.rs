// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod ingest_handler {
    pub use crate::ingest_handler::*;
}
