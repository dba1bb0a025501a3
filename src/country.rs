use std::fmt::{Debug, Display, Formatter};

use compact_str::CompactString;

/// Ship-to country of an order header, the grouping key of the report.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Country {
    s: CompactString,
}

impl Country {
    pub fn as_str(&self) -> &str {
        self.s.as_str()
    }
}

impl<'a> From<&'a str> for Country {
    fn from(value: &'a str) -> Self {
        Country {
            s: CompactString::new(value),
        }
    }
}

impl From<String> for Country {
    fn from(value: String) -> Self {
        Country {
            s: CompactString::from(value),
        }
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl Debug for Country {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show() {
        let c = Country::from("France");
        let s = format!("{}", c);
        assert_eq!(s, "France");

        let s = format!("{:?}", c);
        assert_eq!(s, "\"France\"");
    }

    #[test]
    fn test_order_is_lexical() {
        let mut v = vec![Country::from("USA"), Country::from("Austria")];
        v.sort();
        assert_eq!(v[0].as_str(), "Austria");
    }
}
