use coca::invocation::Invocation;

/// Flag lookups over a composed invocation's arguments.
pub trait InvocationExt {
    /// The `--flag` tokens, in emission order.
    fn flags(&self) -> Vec<&str>;

    /// Value of `--name=value`, if the flag is present.
    fn flag_value(&self, name: &str) -> Option<&str>;
}

impl InvocationExt for Invocation {
    fn flags(&self) -> Vec<&str> {
        self.args
            .iter()
            .map(String::as_str)
            .filter(|arg| arg.starts_with("--"))
            .collect()
    }

    fn flag_value(&self, name: &str) -> Option<&str> {
        let prefix = format!("--{}=", name);
        self.args
            .iter()
            .find_map(|arg| arg.strip_prefix(prefix.as_str()))
    }
}
