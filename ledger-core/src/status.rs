/// Clearing state of a transaction or posting.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Status {
    #[default]
    Undefined,
    Pending,
    Cleared,
}

impl Status {
    /// Maps a status marker (`*` or `!`) to its status.
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '*' => Some(Status::Cleared),
            '!' => Some(Status::Pending),
            _ => None,
        }
    }

    pub fn marker(&self) -> Option<char> {
        match self {
            Status::Undefined => None,
            Status::Pending => Some('!'),
            Status::Cleared => Some('*'),
        }
    }
}

#[test]
fn test_marker_round_trip() {
    for status in [Status::Undefined, Status::Pending, Status::Cleared] {
        let back = status
            .marker()
            .and_then(Status::from_marker)
            .unwrap_or(Status::Undefined);
        assert_eq!(back, status);
    }
    assert_eq!(Status::from_marker('x'), None);
}

#[test]
fn test_default_is_undefined() {
    assert_eq!(Status::default(), Status::Undefined);
    assert_eq!(Status::default().marker(), None);
}
