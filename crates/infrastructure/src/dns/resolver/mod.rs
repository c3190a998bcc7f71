pub mod builder;
pub mod cname;
pub mod recursive;

pub use builder::RecursiveResolverBuilder;
pub use recursive::RecursiveResolver;
