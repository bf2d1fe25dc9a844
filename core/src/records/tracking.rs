use crate::prelude::{VizError, VizResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const BALL_X: &str = "ball_x";
pub const BALL_Y: &str = "ball_y";

/// One team's tracking row at a single instant: column name to value.
///
/// Column order is preserved; absent values are NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, Option<f64>>", into = "IndexMap<String, Option<f64>>")]
pub struct TrackingRecord {
    columns: IndexMap<String, f64>,
}

/// One player's position and velocity columns within a [`TrackingRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerColumns<'a> {
    pub x_column: &'a str,
    pub y_column: &'a str,
    pub x: f64,
    pub y: f64,
}

impl PlayerColumns<'_> {
    /// Column prefix shared by the player's fields, e.g. `Home_11`.
    pub fn prefix(&self) -> &str {
        &self.x_column[..self.x_column.len() - 2]
    }

    /// Jersey number taken from the second `_`-separated token of the column.
    pub fn jersey(&self) -> &str {
        self.x_column.split('_').nth(1).unwrap_or_else(|| self.prefix())
    }

    pub fn has_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl TrackingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: f64) {
        self.columns.insert(column.into(), value);
    }

    pub fn with(mut self, column: impl Into<String>, value: f64) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns.get(column).copied()
    }

    pub fn require(&self, column: &str) -> VizResult<f64> {
        self.get(column)
            .ok_or_else(|| VizError::MissingColumn(column.to_string()))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn axis_columns(&self, suffix: &str, ball: &str) -> Vec<&str> {
        self.columns()
            .filter(|c| c.len() >= 2 && c.is_char_boundary(c.len() - 2))
            .filter(|c| c[c.len() - 2..].eq_ignore_ascii_case(suffix) && *c != ball)
            .collect()
    }

    /// Player x columns (`*_x`, any case, excluding `ball_x`) in column order.
    pub fn x_columns(&self) -> Vec<&str> {
        self.axis_columns("_x", BALL_X)
    }

    pub fn y_columns(&self) -> Vec<&str> {
        self.axis_columns("_y", BALL_Y)
    }

    /// Players with x and y columns paired by order of appearance.
    pub fn players(&self) -> VizResult<Vec<PlayerColumns<'_>>> {
        let xs = self.x_columns();
        let ys = self.y_columns();
        if xs.len() != ys.len() {
            return Err(VizError::ColumnMismatch {
                x: xs.len(),
                y: ys.len(),
            });
        }
        xs.into_iter()
            .zip(ys)
            .map(|(x_column, y_column)| {
                Ok(PlayerColumns {
                    x_column,
                    y_column,
                    x: self.require(x_column)?,
                    y: self.require(y_column)?,
                })
            })
            .collect()
    }

    /// `(vx, vy)` for a player, read from `<prefix>_vx` / `<prefix>_vy`.
    pub fn velocity(&self, player: &PlayerColumns<'_>) -> VizResult<(f64, f64)> {
        let y_prefix = &player.y_column[..player.y_column.len() - 2];
        let vx = self.require(&format!("{}_vx", player.prefix()))?;
        let vy = self.require(&format!("{}_vy", y_prefix))?;
        Ok((vx, vy))
    }

    pub fn ball(&self) -> VizResult<(f64, f64)> {
        Ok((self.require(BALL_X)?, self.require(BALL_Y)?))
    }
}

impl From<IndexMap<String, Option<f64>>> for TrackingRecord {
    fn from(raw: IndexMap<String, Option<f64>>) -> Self {
        let columns = raw
            .into_iter()
            .map(|(name, value)| (name, value.unwrap_or(f64::NAN)))
            .collect();
        Self { columns }
    }
}

impl From<TrackingRecord> for IndexMap<String, Option<f64>> {
    fn from(record: TrackingRecord) -> Self {
        record
            .columns
            .into_iter()
            .map(|(name, value)| (name, value.is_finite().then_some(value)))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for TrackingRecord {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
