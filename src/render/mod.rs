pub mod plain;

pub use plain::{PlainStyle, plain_options, render_comparison_plain, render_plain};
