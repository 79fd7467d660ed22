mod breaker;
mod builder;

#[cfg(test)]
mod tests;

pub(crate) use breaker::char_len;
pub use builder::InlineTextBuilder;
