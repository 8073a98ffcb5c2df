mod approov_ctx;

pub use approov_ctx::ApproovCtx;
