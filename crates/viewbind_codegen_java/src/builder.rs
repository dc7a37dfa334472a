use crate::config::JavaCodeGenConfig;

/// Continuation lines of a wrapped statement sit this many levels deeper.
const CONTINUATION_LEVELS: usize = 2;

/// Incrementally constructs Java source with indentation handling.
#[derive(Debug, Default, Clone)]
pub struct JavaSourceBuilder {
    content: String,
    indent_level: usize,
    indent: String,
}

impl JavaSourceBuilder {
    pub fn new(indent: String) -> Self {
        Self {
            content: String::new(),
            indent_level: 0,
            indent,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.push_indent_levels(self.indent_level);
        self.content.push_str(line);
        self.content.push('\n');
    }

    /// An empty line, never indented.
    pub fn blank_line(&mut self) {
        self.content.push('\n');
    }

    /// Writes `code;`. Embedded newlines continue on deeper-indented lines.
    pub fn push_statement(&mut self, code: &str) {
        let mut lines = code.lines();
        let Some(first) = lines.next() else {
            return;
        };
        let mut rest: Vec<&str> = lines.collect();
        if rest.is_empty() {
            self.push_line(&format!("{first};"));
            return;
        }
        self.push_line(first);
        let last = rest.pop().unwrap_or_default();
        for line in rest {
            self.push_continuation(line);
        }
        self.push_continuation(&format!("{last};"));
    }

    /// Opens `header {` and indents.
    pub fn begin_control_flow(&mut self, header: &str) {
        self.push_line(&format!("{header} {{"));
        self.indent();
    }

    pub fn end_control_flow(&mut self) {
        self.dedent();
        self.push_line("}");
    }

    /// Drops blank lines at the end of the content so a closing brace follows code directly.
    pub fn trim_trailing_blank_lines(&mut self) {
        while self.content.ends_with("\n\n") {
            self.content.pop();
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn build(self) -> String {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    fn push(&mut self, text: &str) {
        self.content.push_str(text);
    }

    fn push_continuation(&mut self, line: &str) {
        self.push_indent_levels(self.indent_level + CONTINUATION_LEVELS);
        self.content.push_str(line);
        self.content.push('\n');
    }

    fn push_indent_levels(&mut self, levels: usize) {
        for _ in 0..levels {
            self.content.push_str(&self.indent);
        }
    }
}

/// Fully-rendered Java compilation unit produced by the generator.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JavaCompilationUnit {
    pub file_comment: Option<String>,
    pub package_declaration: Option<String>,
    pub imports: Vec<String>,
    pub type_declarations: Vec<String>,
}

impl JavaCompilationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_source(&self, config: &JavaCodeGenConfig) -> String {
        let mut builder = JavaSourceBuilder::new(config.indent.clone());

        if let Some(comment) = &self.file_comment {
            for line in comment.lines() {
                builder.push_line(&format!("// {line}"));
            }
        }

        if let Some(package) = &self.package_declaration {
            builder.push_line(&format!("package {package};"));
            builder.blank_line();
        }

        if !self.imports.is_empty() {
            for import in &self.imports {
                builder.push_line(&format!("import {import};"));
            }
            builder.blank_line();
        }

        for (index, declaration) in self.type_declarations.iter().enumerate() {
            if index > 0 {
                builder.blank_line();
            }
            builder.push(declaration);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_statement_uses_continuation_indent() {
        let mut builder = JavaSourceBuilder::new("  ".to_string());
        builder.indent();
        builder.push_statement("call(\na,\nb)");
        assert_eq!(builder.build(), "  call(\n      a,\n      b);\n");
    }

    #[test]
    fn trailing_blank_lines_are_trimmed() {
        let mut builder = JavaSourceBuilder::new("  ".to_string());
        builder.push_statement("a = b");
        builder.blank_line();
        builder.blank_line();
        builder.trim_trailing_blank_lines();
        builder.push_line("}");
        assert_eq!(builder.build(), "a = b;\n}\n");
    }

    #[test]
    fn unit_renders_comment_package_and_imports() {
        let unit = JavaCompilationUnit {
            file_comment: Some("Generated.".to_string()),
            package_declaration: Some("com.example".to_string()),
            imports: vec!["android.view.View".to_string()],
            type_declarations: vec!["class A {\n}\n".to_string()],
        };
        assert_eq!(
            unit.to_source(&JavaCodeGenConfig::default()),
            "// Generated.\npackage com.example;\n\nimport android.view.View;\n\nclass A {\n}\n"
        );
    }
}
