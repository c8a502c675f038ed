/// Source language with a statement solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Ruby,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::C, Language::Ruby];
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "cpp" | "c++" | "objc" => Ok(Language::C),
            "ruby" | "rb" => Ok(Language::Ruby),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::C => write!(f, "c"),
            Language::Ruby => write!(f, "ruby"),
        }
    }
}
