/// Indentation unit used when rendering non-compact output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tabs,
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }

    pub(crate) fn unit(self) -> String {
        match self {
            Indent::Spaces(count) => " ".repeat(count),
            Indent::Tabs => "\t".to_owned(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

/// How [`JsonWriter::write_to_file`] opens the target file.
///
/// [`JsonWriter::write_to_file`]: crate::JsonWriter::write_to_file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Truncate,
    Append,
}

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub indent: Indent,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}
