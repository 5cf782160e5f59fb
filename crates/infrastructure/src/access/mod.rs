mod static_policy;

pub use static_policy::StaticAccessPolicy;
