pub mod internal;
pub mod public;
pub mod registration;

pub use internal::serve_internal;
pub use public::serve_public;
pub use registration::Registration;
