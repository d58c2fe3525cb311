//! Schema descriptor for the five cricket tables.
//!
//! The descriptor is context only: it is rendered into the LLM system prompt
//! and printed by `cricq schema`. It does not create or validate tables; the
//! DDL lives with the loader in `ingest::schema`.

/// One table: name, columns in storage order, and one example row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub example_row: &'static [&'static str],
}

/// Description of the whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    tables: Vec<TableDescriptor>,
}

const DELIVERIES: TableDescriptor = TableDescriptor {
    name: "Deliveries",
    columns: &[
        "delivery_id", "innings_id", "over", "ball", "batter", "bowler", "non_striker",
        "runs_batter", "runs_extras", "runs_total", "extras_type",
    ],
    example_row: &[
        "1", "1", "0", "1", "AN Kervezee", "NN Odhiambo", "ES Szwarczynski", "1", "0", "1",
    ],
};

const INNINGS: TableDescriptor = TableDescriptor {
    name: "Innings",
    columns: &["innings_id", "match_id", "team_batting"],
    example_row: &["1", "ICC Intercontinental Shield_0", "Netherlands"],
};

const MATCHES: TableDescriptor = TableDescriptor {
    name: "Matches",
    columns: &[
        "match_id", "date", "venue", "city", "event_name", "match_number", "gender",
        "match_type", "season", "team_type", "toss_winner", "toss_decision", "winner",
    ],
    example_row: &[
        "ICC Intercontinental Shield_0", "2010-02-20", "Gymkhana Club Ground", "Nairobi",
        "ICC Intercontinental Shield", "0", "male", "MDM", "2009/10", "international",
        "Netherlands", "bat", "Kenya",
    ],
};

const PLAYERS: TableDescriptor = TableDescriptor {
    name: "Players",
    columns: &["player_id", "team_id", "player_name"],
    example_row: &["dc36a6a5", "1", "AN Kervezee"],
};

const TEAMS: TableDescriptor = TableDescriptor {
    name: "Teams",
    columns: &["team_id", "match_id", "team_name"],
    example_row: &["1", "ICC Intercontinental Shield_0", "Netherlands"],
};

impl SchemaDescriptor {
    /// The fixed five-table cricket schema.
    pub fn cricket() -> Self {
        Self {
            tables: vec![DELIVERIES, INNINGS, MATCHES, PLAYERS, TEAMS],
        }
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Render the schema as prompt context.
    ///
    /// # Example
    ///
    /// ```
    /// use cricket_qa::schema::SchemaDescriptor;
    ///
    /// let context = SchemaDescriptor::cricket().prompt_context();
    /// assert!(context.starts_with("The database has the following tables:"));
    /// assert!(context.contains("3. Matches: match_id, date,"));
    /// ```
    pub fn prompt_context(&self) -> String {
        let mut out = String::from("The database has the following tables:\n");
        for (i, table) in self.tables.iter().enumerate() {
            out.push_str(&format!(
                "{}. {}: {}.\n   Example row: {}.\n",
                i + 1,
                table.name,
                table.columns.join(", "),
                table.example_row.join(", ")
            ));
            if i + 1 < self.tables.len() {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for SchemaDescriptor {
    fn default() -> Self {
        Self::cricket()
    }
}
