/*
    This module parses deriveration paths passed in as strings
    into vectors of ChildOptions that can be used to derive a child key.

    Grammar: "m" (or "M") followed by zero or more "/index" segments,
    where index is a decimal number below 2^31 optionally followed by a
    single ' marking a hardened child.
*/

use std::{
    fmt,
    str::FromStr
};

use crate::hdwallet::{
    ChildOptions,
    HDWError,
    HARDENED_OFFSET
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    pub children: Vec<ChildOptions>
}

impl Path {
    pub fn empty() -> Self {
        Self {
            children: vec![]
        }
    }

    /**
        m/purpose'/coin_type'/account'
    */
    pub fn bip44_account(purpose: u32, coin_type: u32, account: u32) -> Self {
        Self {
            children: vec![
                ChildOptions::Hardened(purpose),
                ChildOptions::Hardened(coin_type),
                ChildOptions::Hardened(account)
            ]
        }
    }

    /**
        Returns a new path with the child appended.
    */
    pub fn child(&self, child: ChildOptions) -> Self {
        let mut children = self.children.clone();
        children.push(child);
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /**
        Raw 32 bit indexes, hardened ones offset by 2^31.
    */
    pub fn indices(&self) -> Result<Vec<u32>, HDWError> {
        self.children.iter().map(|c| c.to_index()).collect()
    }
}

fn parse_segment(segment: &str) -> Option<ChildOptions> {
    let (digits, hardened) = match segment.strip_suffix('\'') {
        Some(x) => (x, true),
        None => (segment, false)
    };

    //u32::from_str would also accept a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None
    }

    let index: u32 = digits.parse().ok()?;
    if index >= HARDENED_OFFSET {
        return None
    }

    Some(if hardened { ChildOptions::Hardened(index) } else { ChildOptions::Normal(index) })
}

impl FromStr for Path {
    type Err = HDWError;

    fn from_str(path: &str) -> Result<Self, HDWError> {
        let bad = |segment: &str| HDWError::InvalidPathSyntax {
            path: path.to_string(),
            segment: segment.to_string()
        };

        let mut segments = path.split('/');
        match segments.next() {
            Some("m") | Some("M") => { /* Continue */ },
            Some(x) => return Err(bad(x)),
            None => return Err(bad(""))
        }

        let mut children: Vec<ChildOptions> = vec![];
        for segment in segments {
            children.push(parse_segment(segment).ok_or_else(|| bad(segment))?);
        }

        Ok(Self { children })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.children {
            match child {
                ChildOptions::Normal(x) => write!(f, "/{}", x)?,
                ChildOptions::Hardened(x) => write!(f, "/{}'", x)?
            }
        }
        Ok(())
    }
}
