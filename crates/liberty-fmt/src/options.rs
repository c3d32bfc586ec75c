//! Formatter options, shaped after `rhai-fmt`'s `Options` struct — a small
//! plain-data struct with a `Default` impl rather than `rhai-fmt`'s
//! `create_options!`-generated incomplete/builder variants, since this
//! formatter takes exactly one knob (§4.3).

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Spaces per indentation level.
    pub indent_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { indent_size: 2 }
    }
}
