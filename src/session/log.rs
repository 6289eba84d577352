use std::fmt;

use serde::{Deserialize, Serialize};

/// One user input and the model's reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub response: String,
}

impl Exchange {
    pub fn new(user: &str, response: &str) -> Self {
        Self {
            user: user.to_string(),
            response: response.to_string(),
        }
    }
}

/// Append-only record of exchanges. Entries can be read but never
/// edited; the only way to remove one is to clear the whole log.
#[derive(Clone, Debug, Default)]
pub struct SessionLog {
    entries: Vec<Exchange>,
}

impl SessionLog {
    pub fn push(&mut self, exchange: Exchange) {
        self.entries.push(exchange);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Exchange] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SessionLog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for Exchange { user, response } in &self.entries {
            writeln!(f, "**You:** {}", user)?;
            writeln!(f, "**AI:** {}", response)?;
            writeln!(f, "---")?;
        }
        Ok(())
    }
}
