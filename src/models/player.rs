use serde::{Deserialize, Serialize};

/// Number of features the classifier was trained on.
pub const FEATURE_COUNT: usize = 19;

/// Query-parameter names, in model column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "GP", "MIN", "PTS", "FGM", "FGA", "FGP", "PM", "PA", "PAP", "FTM", "FTA", "FTP", "OREB",
    "DREB", "REB", "AST", "STL", "BLK", "TOV",
];

/// Per-game statistics of a single player-season.
///
/// Field names follow the query parameters of `/api/nba/predict`
/// (`PM`/`PA`/`PAP` are three-point made / attempted / percentage).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct PlayerStats {
    pub gp: f64,
    pub min: f64,
    pub pts: f64,
    pub fgm: f64,
    pub fga: f64,
    pub fgp: f64,
    pub pm: f64,
    pub pa: f64,
    pub pap: f64,
    pub ftm: f64,
    pub fta: f64,
    pub ftp: f64,
    pub oreb: f64,
    pub dreb: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
}

impl PlayerStats {
    /// Values in the order listed by [`FEATURE_NAMES`].
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.gp, self.min, self.pts, self.fgm, self.fga, self.fgp, self.pm, self.pa,
            self.pap, self.ftm, self.fta, self.ftp, self.oreb, self.dreb, self.reb, self.ast,
            self.stl, self.blk, self.tov,
        ]
    }
}
