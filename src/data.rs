//! Scene file loading
//!
//! A scene is a TOML document with a `[canvas]` table and three arrays of
//! rows: `[[zones]]`, `[[points]]` and `[[profiles]]`. Cells are loosely
//! typed, so a label may be a number, a flag may be `1`, `true` or `"1"`,
//! and a coordinate may be a `"(x, y)"` string or an `[x, y]` array.
//! Rows that cannot be turned into geometry are kept and skipped at layout
//! time; [`SceneData::diagnostics`] explains why.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::error::ParseError;
use crate::layout::{LayoutConfig, Marker, Point, Profile, RecordKind, Rgb, Size, Zone};
use crate::parser::parse_coordinate;

/// Errors that can occur when loading a scene file
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Raw scene file contents
#[derive(Debug, Clone, Deserialize)]
pub struct SceneData {
    pub canvas: CanvasRow,
    #[serde(default)]
    pub zones: Vec<ZoneRow>,
    #[serde(default)]
    pub points: Vec<PointRow>,
    #[serde(default)]
    pub profiles: Vec<ProfileRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasRow {
    pub width: f64,
    pub height: f64,
    /// Background image reference: a path, URL or data URI
    pub background: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneRow {
    #[serde(alias = "Label")]
    pub label: Option<toml::Value>,
    #[serde(alias = "Corner Position 1")]
    pub corner_1: Option<toml::Value>,
    #[serde(alias = "Corner Position 3")]
    pub corner_3: Option<toml::Value>,
    #[serde(alias = "Font Size")]
    pub font_size: Option<toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointRow {
    #[serde(alias = "Position")]
    pub position: Option<toml::Value>,
    /// Every other column, keyed by profile
    #[serde(flatten)]
    pub flags: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    #[serde(alias = "Profile")]
    pub profile: String,
    #[serde(alias = "Color")]
    pub color: String,
    #[serde(alias = "Name")]
    pub name: Option<String>,
}

impl SceneData {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, DataError> {
        Ok(toml::from_str(content)?)
    }

    pub fn canvas(&self) -> Size {
        Size::new(self.canvas.width, self.canvas.height)
    }

    pub fn background(&self) -> &str {
        &self.canvas.background
    }

    /// Zones in file order; unparseable corners become `None`
    pub fn zones(&self, config: &LayoutConfig) -> Vec<Zone> {
        self.zones
            .iter()
            .map(|row| Zone {
                label: row.label.as_ref().map(cell_text).unwrap_or_default(),
                corner_a: row.corner_1.as_ref().and_then(cell_coordinate),
                corner_b: row.corner_3.as_ref().and_then(cell_coordinate),
                font_size: row
                    .font_size
                    .as_ref()
                    .and_then(cell_number)
                    .filter(|size| *size > 0.0)
                    .unwrap_or(config.default_font_size),
            })
            .collect()
    }

    /// Markers in file order with their truthy flags as memberships
    pub fn markers(&self) -> Vec<Marker> {
        self.points
            .iter()
            .map(|row| Marker {
                position: row.position.as_ref().and_then(cell_coordinate),
                members: row
                    .flags
                    .iter()
                    .filter(|(_, value)| is_truthy(value))
                    .map(|(key, _)| key.clone())
                    .collect(),
            })
            .collect()
    }

    /// Profiles in table order
    ///
    /// A repeated key keeps its first row. A color that is not `#RRGGBB`
    /// falls back to black.
    pub fn profiles(&self) -> Vec<Profile> {
        let mut seen = HashSet::new();
        let mut profiles = Vec::with_capacity(self.profiles.len());
        for row in &self.profiles {
            if !seen.insert(row.profile.as_str()) {
                warn!(profile = %row.profile, "ignoring duplicate profile");
                continue;
            }
            let color = Rgb::from_hex(&row.color).unwrap_or_else(|| {
                warn!(profile = %row.profile, color = %row.color, "invalid profile color, using black");
                Rgb::BLACK
            });
            let name = row.name.clone().unwrap_or_else(|| row.profile.clone());
            profiles.push(Profile::new(row.profile.clone(), color, name));
        }
        profiles
    }

    /// Explain every row that will be skipped or partly ignored
    pub fn diagnostics(&self) -> Vec<RowDiagnostic> {
        let mut diagnostics = Vec::new();

        for (row, zone) in self.zones.iter().enumerate() {
            for (field, token) in [("corner_1", &zone.corner_1), ("corner_3", &zone.corner_3)] {
                if let Some(diag) = check_coordinate(RecordKind::Zone, row, field, token.as_ref())
                {
                    diagnostics.push(diag);
                }
            }
        }

        let known: HashSet<String> = self.profiles.iter().map(|p| p.profile.clone()).collect();
        for (row, point) in self.points.iter().enumerate() {
            if let Some(diag) =
                check_coordinate(RecordKind::Marker, row, "position", point.position.as_ref())
            {
                diagnostics.push(diag);
            }

            let mut unknown: Vec<&String> = point
                .flags
                .iter()
                .filter(|(key, value)| is_truthy(value) && !known.contains(*key))
                .map(|(key, _)| key)
                .collect();
            unknown.sort();
            for key in unknown {
                diagnostics.push(RowDiagnostic {
                    table: RecordKind::Marker,
                    row,
                    field: key.clone(),
                    token: None,
                    problem: Problem::UnknownProfile {
                        suggestions: find_similar(&known, key, 2),
                    },
                });
            }
        }

        diagnostics
    }
}

/// Point from a coordinate cell: a token string or a two-number array
fn cell_coordinate(value: &toml::Value) -> Option<Point> {
    match value {
        toml::Value::String(token) => parse_coordinate(token).ok(),
        toml::Value::Array(items) => match items.as_slice() {
            [x, y] => Some(Point::new(array_number(x)?, array_number(y)?)),
            _ => None,
        },
        _ => None,
    }
}

fn array_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn check_coordinate(
    table: RecordKind,
    row: usize,
    field: &str,
    cell: Option<&toml::Value>,
) -> Option<RowDiagnostic> {
    let (problem, token) = match cell {
        None => (Problem::Missing, None),
        Some(toml::Value::String(token)) => (
            Problem::Invalid(parse_coordinate(token).err()?),
            Some(token.clone()),
        ),
        Some(value) => {
            if cell_coordinate(value).is_some() {
                return None;
            }
            (
                Problem::WrongType {
                    found: value.type_str(),
                },
                Some(value.to_string()),
            )
        }
    };
    Some(RowDiagnostic {
        table,
        row,
        field: field.to_string(),
        token,
        problem,
    })
}

/// Text of a label cell
fn cell_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn cell_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whether a flag cell marks membership
pub fn is_truthy(value: &toml::Value) -> bool {
    match value {
        toml::Value::Boolean(b) => *b,
        toml::Value::Integer(i) => *i == 1,
        toml::Value::Float(f) => *f == 1.0,
        toml::Value::String(s) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

/// A row that will be skipped or has an ignored cell
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    pub table: RecordKind,
    /// Zero-based row index within its table
    pub row: usize,
    pub field: String,
    /// The offending cell text, when there was one
    pub token: Option<String>,
    pub problem: Problem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Required coordinate cell is absent
    Missing,
    /// Coordinate string does not parse
    Invalid(Vec<ParseError>),
    /// Coordinate cell is neither a string nor a two-number array
    WrongType { found: &'static str },
    /// Flag column names no profile
    UnknownProfile { suggestions: Vec<String> },
}

impl RowDiagnostic {
    fn location(&self) -> String {
        let table = match self.table {
            RecordKind::Zone => "zones",
            RecordKind::Marker => "points",
        };
        format!("{}[{}].{}", table, self.row + 1, self.field)
    }

    /// Human-readable report, with source context for parse errors
    pub fn render(&self) -> String {
        match (&self.problem, &self.token) {
            (Problem::Invalid(errors), Some(token)) => {
                let location = self.location();
                errors
                    .iter()
                    .map(|e| e.format(token, &location))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        match &self.problem {
            Problem::Missing => write!(f, "{}: missing, {} skipped", location, self.table),
            Problem::Invalid(_) => write!(
                f,
                "{}: cannot parse {:?}, {} skipped",
                location,
                self.token.as_deref().unwrap_or_default(),
                self.table
            ),
            Problem::WrongType { found } => write!(
                f,
                "{}: expected \"(x, y)\" or [x, y], found {} {}, {} skipped",
                location,
                found,
                self.token.as_deref().unwrap_or_default(),
                self.table
            ),
            Problem::UnknownProfile { suggestions } => {
                write!(f, "{}: no profile with this key, flag ignored", location)?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean {}?)", suggestions.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Up to three known keys within `max_distance` edits of `target`
fn find_similar(known: &HashSet<String>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &String)> = known
        .iter()
        .map(|name| (levenshtein_distance(name, target), name))
        .filter(|(dist, _)| *dist > 0 && *dist <= max_distance)
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCENE: &str = r##"
[canvas]
width = 800
height = 600
background = "images/plan.jpg"

[[zones]]
Label = "Kitchen"
"Corner Position 1" = "(0, 0)"
"Corner Position 3" = "(100, 40)"
font_size = "20"

[[zones]]
label = 101
corner_1 = "(10, oops)"
corner_3 = "[50, 50]"

[[points]]
Position = "(300, 200)"
anna = 1
ben = "1"
carla = 0
annna = true

[[profiles]]
Profile = "anna"
Color = "#FF0000"
Name = "Anna"

[[profiles]]
profile = "ben"
color = "not a color"

[[profiles]]
profile = "anna"
color = "#00FF00"
name = "Duplicate"
"##;

    fn scene() -> SceneData {
        SceneData::from_str(SCENE).unwrap()
    }

    #[test]
    fn test_canvas() {
        let scene = scene();
        assert_eq!(scene.canvas(), Size::new(800.0, 600.0));
        assert_eq!(scene.background(), "images/plan.jpg");
    }

    #[test]
    fn test_zones_accept_header_aliases() {
        let zones = scene().zones(&LayoutConfig::default());
        assert_eq!(
            zones[0],
            Zone::new("Kitchen", Point::new(0.0, 0.0), Point::new(100.0, 40.0), 20.0)
        );
    }

    #[test]
    fn test_bad_corner_and_default_font_size() {
        let zones = scene().zones(&LayoutConfig::default());
        assert_eq!(zones[1].label, "101");
        assert_eq!(zones[1].corner_a, None);
        assert_eq!(zones[1].corner_b, Some(Point::new(50.0, 50.0)));
        assert_eq!(zones[1].font_size, 40.0);
    }

    #[test]
    fn test_marker_memberships() {
        let markers = scene().markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, Some(Point::new(300.0, 200.0)));
        assert!(markers[0].is_member("anna"));
        assert!(markers[0].is_member("ben"));
        assert!(!markers[0].is_member("carla"));
        assert_eq!(markers[0].members.len(), 3);
    }

    #[test]
    fn test_profiles_dedupe_and_color_fallback() {
        let profiles = scene().profiles();
        assert_eq!(
            profiles,
            vec![
                Profile::new("anna", Rgb::new(255, 0, 0), "Anna"),
                Profile::new("ben", Rgb::BLACK, "ben"),
            ]
        );
    }

    #[test]
    fn test_truthiness() {
        use toml::Value;
        assert!(is_truthy(&Value::Boolean(true)));
        assert!(is_truthy(&Value::Integer(1)));
        assert!(is_truthy(&Value::Float(1.0)));
        assert!(is_truthy(&Value::String("TRUE".into())));
        assert!(is_truthy(&Value::String(" 1 ".into())));
        assert!(!is_truthy(&Value::Integer(2)));
        assert!(!is_truthy(&Value::String("yes".into())));
        assert!(!is_truthy(&Value::Boolean(false)));
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = scene().diagnostics();
        assert_eq!(diagnostics.len(), 2);

        assert_eq!(diagnostics[0].location(), "zones[2].corner_1");
        assert!(matches!(diagnostics[0].problem, Problem::Invalid(_)));
        assert_eq!(
            diagnostics[0].to_string(),
            r#"zones[2].corner_1: cannot parse "(10, oops)", zone skipped"#
        );
        assert!(diagnostics[0].render().contains("zones[2].corner_1"));

        assert_eq!(
            diagnostics[1].to_string(),
            "points[1].annna: no profile with this key, flag ignored (did you mean anna?)"
        );
    }

    #[test]
    fn test_missing_position_diagnostic() {
        let scene = SceneData::from_str(
            r#"
[canvas]
width = 10
height = 10
background = "bg.png"

[[points]]
x = 1
"#,
        )
        .unwrap();
        let diagnostics = scene.diagnostics();
        assert_eq!(diagnostics[0].problem, Problem::Missing);
        assert_eq!(diagnostics[0].to_string(), "points[1].position: missing, point skipped");
        assert_eq!(diagnostics[1].field, "x");
    }

    #[test]
    fn test_non_string_coordinates_skip_only_their_row() {
        let scene = SceneData::from_str(
            r#"
[canvas]
width = 400
height = 400
background = "bg.png"

[[zones]]
label = "Array and integer"
corner_1 = [10, 20]
corner_3 = 5

[[zones]]
label = "Arrays"
corner_1 = [30, 40.5]
corner_3 = [130, 80]

[[zones]]
label = "Three numbers"
corner_1 = [1, 2, 3]
corner_3 = "(5, 5)"

[[points]]
position = [200, 200]
"#,
        )
        .unwrap();

        let zones = scene.zones(&LayoutConfig::default());
        assert_eq!(zones[0].corner_a, Some(Point::new(10.0, 20.0)));
        assert_eq!(zones[0].corner_b, None);
        assert_eq!(zones[1].corners(), Some((Point::new(30.0, 40.5), Point::new(130.0, 80.0))));
        assert_eq!(zones[2].corner_a, None);
        assert_eq!(scene.markers()[0].position, Some(Point::new(200.0, 200.0)));

        let diagnostics = scene.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].problem, Problem::WrongType { found: "integer" });
        assert_eq!(
            diagnostics[0].to_string(),
            r#"zones[1].corner_3: expected "(x, y)" or [x, y], found integer 5, zone skipped"#
        );
        assert_eq!(diagnostics[1].location(), "zones[3].corner_1");
        assert_eq!(diagnostics[1].problem, Problem::WrongType { found: "array" });
    }

    #[test]
    fn test_missing_canvas_is_an_error() {
        let err = SceneData::from_str("[[zones]]\nlabel = \"x\"").unwrap_err();
        assert!(matches!(err, DataError::Toml(_)));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }
}
