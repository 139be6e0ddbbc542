/// Parsed `.env` file: statements in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct File {
    pub statements: Vec<Statement>,
}

/// A single line-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Assignment(Assignment),
    Comment(Comment),
}

/// `NAME=value`. A bare `NAME` or `NAME=` has an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

/// Comment text, `#` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl File {
    /// Iterate over assignments, skipping comments.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Statement::Assignment(assign) => Some(assign),
            Statement::Comment(_) => None,
        })
    }

    /// Iterate over comments.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Statement::Comment(comment) => Some(comment),
            Statement::Assignment(_) => None,
        })
    }
}

impl Assignment {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Assignment with no value, as produced by `NAME` or `NAME=`.
    #[must_use]
    pub fn naked(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }
}

impl Comment {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<Assignment> for Statement {
    fn from(assign: Assignment) -> Self {
        Self::Assignment(assign)
    }
}

impl From<Comment> for Statement {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}
