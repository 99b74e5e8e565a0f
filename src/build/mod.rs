mod builder;
mod fetch;
mod markdown;
mod page;
mod paths;
mod pipeline;

pub use builder::Builder;
