//! Output emitter.
//!
//! The printer writes through an [`Emitter`] so the destination can vary;
//! [`StringEmitter`] builds the text in memory.

/// Trait for emitting printed output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation for nesting `level`.
    fn emit_indent(&mut self, level: usize);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter.
pub struct StringEmitter {
    buffer: String,
    indent_size: usize,
}

impl StringEmitter {
    /// Create an emitter indenting `indent_size` spaces per level.
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_size,
        }
    }

    /// Get the output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        let spaces = level * self.indent_size;
        self.buffer.extend(std::iter::repeat(' ').take(spaces));
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}
