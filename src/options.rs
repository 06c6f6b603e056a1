use crate::constants::{DEFAULT_INDENT, MAX_DEPTH};

#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub max_depth: usize,
    pub allow_trailing: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_allow_trailing(mut self, allow_trailing: bool) -> Self {
        self.allow_trailing = allow_trailing;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            allow_trailing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// PHP `var_export` literal notation.
    VarExport,
    #[default]
    Json,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// JSON indentation width; zero renders compact JSON. `var_export`
    /// layout is fixed and ignores it.
    pub indent: usize,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            indent: DEFAULT_INDENT,
        }
    }
}
