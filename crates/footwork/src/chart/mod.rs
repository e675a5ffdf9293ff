//! Chart model: cells, rows, measures and whole charts as timed note grids.
//!
//! A chart is a list of [`Measure`]s, each holding exactly [`TICKS_PER_MEASURE`]
//! rows. A row has one [`Cell`] per column; the column count follows the
//! [`ChartStyle`]. Generated charts are always [`ChartStyle::Single`], with one
//! column per [`Pad`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod template;

/// Smallest chart time unit count in one measure.
pub const TICKS_PER_MEASURE: usize = 192;

/// Content of a single column at a single tick.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Tap,
    HoldHead,
    /// End of a hold or roll.
    Tail,
    RollHead,
    Mine,
    Lift,
    Fake,
    /// A note that may be played by either foot.
    Wildcard,
}

impl Cell {
    /// Parses a standard simfile note symbol. [`Cell::Wildcard`] has no symbol.
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::Tap),
            '2' => Some(Cell::HoldHead),
            '3' => Some(Cell::Tail),
            '4' => Some(Cell::RollHead),
            'M' => Some(Cell::Mine),
            'L' => Some(Cell::Lift),
            'F' => Some(Cell::Fake),
            _ => None,
        }
    }

    pub fn symbol(self) -> Option<char> {
        match self {
            Cell::Empty => Some('0'),
            Cell::Tap => Some('1'),
            Cell::HoldHead => Some('2'),
            Cell::Tail => Some('3'),
            Cell::RollHead => Some('4'),
            Cell::Mine => Some('M'),
            Cell::Lift => Some('L'),
            Cell::Fake => Some('F'),
            Cell::Wildcard => None,
        }
    }

    /// True for cells that start a footstep: taps, hold and roll heads, wildcards.
    pub fn is_note(self) -> bool {
        matches!(
            self,
            Cell::Tap | Cell::HoldHead | Cell::RollHead | Cell::Wildcard
        )
    }

    pub fn is_mine(self) -> bool {
        self == Cell::Mine
    }
}

/// Pad layout of a chart.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartStyle {
    #[default]
    Single,
    Double,
}

impl ChartStyle {
    pub fn columns(self) -> usize {
        match self {
            ChartStyle::Single => 4,
            ChartStyle::Double => 8,
        }
    }

    pub fn game_name(self) -> &'static str {
        match self {
            ChartStyle::Single => "dance-single",
            ChartStyle::Double => "dance-double",
        }
    }

    pub fn from_game_name(name: &str) -> Option<ChartStyle> {
        match name.trim() {
            "dance-single" => Some(ChartStyle::Single),
            "dance-double" => Some(ChartStyle::Double),
            _ => None,
        }
    }
}

/// One of the four dance pads. The discriminant is the output column.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pad {
    Left = 0,
    Down = 1,
    Up = 2,
    Right = 3,
}

impl Pad {
    pub const ALL: [Pad; 4] = [Pad::Left, Pad::Down, Pad::Up, Pad::Right];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Pad> {
        Pad::ALL.get(index).copied()
    }

    pub fn arrow(self) -> char {
        match self {
            Pad::Left => '←',
            Pad::Down => '↓',
            Pad::Up => '↑',
            Pad::Right => '→',
        }
    }
}

pub type Row = Vec<Cell>;

/// Parses a row written with simfile symbols, e.g. `"1M00"`.
pub fn row_from_symbols(symbols: &str) -> Result<Row> {
    symbols
        .chars()
        .map(|c| {
            Cell::from_symbol(c)
                .ok_or_else(|| Error::MalformedTemplate(format!("unknown note symbol '{c}'")))
        })
        .collect()
}

/// A measure of [`TICKS_PER_MEASURE`] rows.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Measure {
    pub rows: Vec<Row>,
}

impl Measure {
    /// Creates a measure with every cell empty.
    pub fn empty(columns: usize) -> Self {
        Self {
            rows: vec![vec![Cell::Empty; columns]; TICKS_PER_MEASURE],
        }
    }

    /// Spreads a quantized measure (4, 8, 12, 16, 24, 32, 48, 64 or 192 rows)
    /// evenly over the tick grid.
    pub fn from_quantized(rows: Vec<Row>) -> Result<Self> {
        let count = rows.len();
        if count == 0 || count % 4 != 0 || TICKS_PER_MEASURE % count != 0 {
            return Err(Error::MalformedTemplate(format!(
                "a measure cannot be split into {count} rows"
            )));
        }
        let columns = rows[0].len();
        if let Some(bad) = rows.iter().position(|r| r.len() != columns) {
            return Err(Error::MalformedTemplate(format!(
                "row {bad} has {} columns, expected {columns}",
                rows[bad].len()
            )));
        }

        let spacing = TICKS_PER_MEASURE / count;
        let mut measure = Measure::empty(columns);
        for (i, row) in rows.into_iter().enumerate() {
            measure.rows[i * spacing] = row;
        }
        Ok(measure)
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// A single chart: metadata plus its note grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chart {
    pub style: ChartStyle,
    /// Author tag. Templates are marked `template`, output is marked `generated`.
    pub credit: String,
    pub difficulty: String,
    /// Numeric "feet" rating, kept verbatim.
    pub meter: String,
    /// Groove radar values, kept verbatim.
    pub groove: String,
    pub measures: Vec<Measure>,
}

impl Chart {
    pub fn new(style: ChartStyle, credit: impl Into<String>) -> Self {
        Self {
            style,
            credit: credit.into(),
            difficulty: String::new(),
            meter: String::new(),
            groove: String::new(),
            measures: Vec::new(),
        }
    }

    /// Creates a chart with `measure_count` empty measures.
    pub fn empty(style: ChartStyle, credit: impl Into<String>, measure_count: usize) -> Self {
        Self::new(style, credit).with_measures(vec![Measure::empty(style.columns()); measure_count])
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_meter(mut self, meter: impl Into<String>) -> Self {
        self.meter = meter.into();
        self
    }

    pub fn with_groove(mut self, groove: impl Into<String>) -> Self {
        self.groove = groove.into();
        self
    }

    pub fn with_measures(mut self, measures: Vec<Measure>) -> Self {
        self.measures = measures;
        self
    }

    pub fn tick_count(&self) -> usize {
        self.measures.len() * TICKS_PER_MEASURE
    }

    pub fn row(&self, tick: usize) -> Option<&Row> {
        self.measures
            .get(tick / TICKS_PER_MEASURE)
            .and_then(|m| m.rows.get(tick % TICKS_PER_MEASURE))
    }

    pub fn row_mut(&mut self, tick: usize) -> Option<&mut Row> {
        self.measures
            .get_mut(tick / TICKS_PER_MEASURE)
            .and_then(|m| m.rows.get_mut(tick % TICKS_PER_MEASURE))
    }

    /// Writes `cell` at `(tick, column)`, growing the chart by whole measures if needed.
    pub fn set_cell(&mut self, tick: usize, column: usize, cell: Cell) -> Result<()> {
        let columns = self.style.columns();
        if column >= columns {
            return Err(Error::MalformedTemplate(format!(
                "column {column} out of range for {}",
                self.style.game_name()
            )));
        }
        while self.tick_count() <= tick {
            self.measures.push(Measure::empty(columns));
        }
        if let Some(row) = self.row_mut(tick) {
            row[column] = cell;
        }
        Ok(())
    }

    /// Every `(tick, column)` holding a note, in time order.
    pub fn note_positions(&self) -> Vec<(usize, usize)> {
        template::timed_rows(self)
            .flat_map(|(tick, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_note())
                    .map(move |(column, _)| (tick, column))
            })
            .collect()
    }
}
