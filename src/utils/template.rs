//! String template rendering utilities.

pub struct TemplateVars;

impl TemplateVars {
    pub const INPUT: &'static str = "input";
    pub const FILE: &'static str = "file";
    pub const PRECISION: &'static str = "precision";
}

pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

/// Render every argument of a command line.
pub fn render_args(args: &[String], variables: &[(&str, &str)]) -> Vec<String> {
    args.iter().map(|arg| render(arg, variables)).collect()
}

pub fn is_present(template: &str, key: &str) -> bool {
    let placeholder = format!("{{{{{}}}}}", key);
    template.contains(&placeholder)
}
