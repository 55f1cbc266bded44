use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Clone)]
pub struct Arguments {
    buf: Vec<String>,
    idx: usize,
}

#[derive(Debug)]
pub enum ArgumentError {
    MissingArgument { name: &'static str },
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ArgumentError::MissingArgument { name } => {
                write!(f, "Expected the {} argument", name)
            }
        }
    }
}

impl StdError for ArgumentError {}

pub trait FromArgs {
    fn from_args(args: &mut Arguments) -> Result<Self, ArgumentError>
    where
        Self: Sized;
}

impl Arguments {
    pub fn new(buf: &str) -> Self {
        let args = buf.split_whitespace().map(ToOwned::to_owned).collect();
        Self { buf: args, idx: 0 }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&str> {
        let res = self.buf.get(self.idx);
        self.idx += 1;
        res.map(String::as_str)
    }

    /// Remaining arguments joined by single spaces. `None` once nothing is left.
    pub fn rest(&self) -> Option<String> {
        match self.buf.get(self.idx..) {
            Some(rest) if !rest.is_empty() => Some(rest.join(" ")),
            _ => None,
        }
    }
}

impl<T: FromArgs> FromArgs for (T,) {
    fn from_args(args: &mut Arguments) -> Result<Self, ArgumentError> {
        T::from_args(args).map(|a| (a,))
    }
}

#[cfg(test)]
mod tests {
    use super::Arguments;

    #[test]
    fn splits_on_whitespace() {
        let mut args = Arguments::new("  555   111, 222 ,333  ");
        assert_eq!(args.next(), Some("555"));
        assert_eq!(args.rest().as_deref(), Some("111, 222 ,333"));
        assert_eq!(args.next(), Some("111,"));
        assert_eq!(args.next(), Some("222"));
        assert_eq!(args.next(), Some(",333"));
        assert_eq!(args.next(), None);
        assert_eq!(args.rest(), None);
    }

    #[test]
    fn empty_input() {
        let mut args = Arguments::new("   ");
        assert_eq!(args.rest(), None);
        assert_eq!(args.next(), None);
    }
}
