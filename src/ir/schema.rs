//! Runtime shape and range checks for untrusted project data.
//!
//! [`parse_project`] walks a [`serde_json::Value`] once, collecting every
//! field violation (not just the first) as a [`SchemaIssue`] with a path such
//! as `levels[0].walls[2].thicknessMm`. Only when the walk finds no issue is
//! the typed [`Project`] returned.
//!
//! Parsing is total: any JSON value is a valid input. Unknown keys are
//! ignored, and integer fields accept JSON numbers without a fractional part
//! (`2700` and `2700.0` alike).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::ids::IdKind;
use super::types::*;

/// A single field violation found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    /// Dotted path to the offending field; empty for the document root.
    pub path: String,
    pub message: String,
}

/// Error returned by [`parse_project`]; lists every violation found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid project data: {}", format_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

fn format_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|i| {
            if i.path.is_empty() {
                i.message.clone()
            } else {
                format!("{}: {}", i.path, i.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of [`safe_parse_project`].
///
/// Serializes as `{ "success": true, "project": … }` or
/// `{ "success": false, "errors": [ … ] }`.
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse {
    Success(Project),
    Failure(Vec<SchemaIssue>),
}

impl SafeParse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl Serialize for SafeParse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Self::Success(project) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("project", project)?;
            }
            Self::Failure(errors) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("errors", errors)?;
            }
        }
        map.end()
    }
}

/// Check `data` against the project shape and return the typed project.
pub fn parse_project(data: &Value) -> Result<Project, SchemaError> {
    let mut checker = Checker::default();
    let project = checker.project(data);
    match project {
        Some(project) if checker.issues.is_empty() => Ok(project),
        _ => Err(SchemaError {
            issues: checker.issues,
        }),
    }
}

/// Non-failing variant of [`parse_project`].
pub fn safe_parse_project(data: &Value) -> SafeParse {
    match parse_project(data) {
        Ok(project) => SafeParse::Success(project),
        Err(e) => SafeParse::Failure(e.issues),
    }
}

/// Parse JSON text; syntax errors are reported as a single root issue.
pub fn parse_project_str(json: &str) -> Result<Project, SchemaError> {
    let value: Value = serde_json::from_str(json).map_err(|e| SchemaError {
        issues: vec![SchemaIssue {
            path: String::new(),
            message: format!("invalid JSON: {e}"),
        }],
    })?;
    parse_project(&value)
}

/// A single-level project with no walls or openings and fresh timestamps.
pub fn create_empty_project(name: &str) -> Project {
    let now = now_timestamp();
    Project {
        id: "p1".to_string(),
        name: name.to_string(),
        units: UNITS_MM.to_string(),
        levels: vec![Level {
            id: "l1".to_string(),
            name: "Ground Floor".to_string(),
            walls: Vec::new(),
            openings: Vec::new(),
        }],
        created_at: Some(now.clone()),
        updated_at: Some(now),
    }
}

/// Current UTC time as RFC 3339 with millisecond precision and a `Z` suffix.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── Walker ────────────────────────────────────────────────────────────────────

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

/// Inclusive integer bounds for a field.
#[derive(Clone, Copy)]
struct Range {
    min: i64,
    max: i64,
}

impl Range {
    const fn between(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

#[derive(Default)]
struct Checker {
    issues: Vec<SchemaIssue>,
}

impl Checker {
    fn report(&mut self, path: String, message: impl Into<String>) {
        self.issues.push(SchemaIssue {
            path,
            message: message.into(),
        });
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.report(
                    path.to_string(),
                    format!("expected object, received {}", type_name(other)),
                );
                None
            }
        }
    }

    /// A required key; reports when absent (explicit `null` counts as present
    /// and is rejected by the typed accessor).
    fn required<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<&'a Value> {
        let value = obj.get(key);
        if value.is_none() {
            self.report(join(path, key), "required");
        }
        value
    }

    fn string(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<String> {
        match self.required(obj, key, path)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.report(
                    join(path, key),
                    format!("expected string, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn id(&mut self, obj: &Map<String, Value>, path: &str, kind: IdKind) -> Option<String> {
        let id = self.string(obj, "id", path)?;
        if !kind.matches(&id) {
            self.report(
                join(path, "id"),
                format!("invalid id '{id}': expected '{}' followed by digits", kind.prefix()),
            );
            return None;
        }
        Some(id)
    }

    fn integer_value(&mut self, value: &Value, path: String, range: Range) -> Option<i64> {
        let n = match value {
            Value::Number(n) => n,
            other => {
                self.report(path, format!("expected integer, received {}", type_name(other)));
                return None;
            }
        };
        let int = match n.as_i64() {
            Some(i) => i,
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 / 2.0 => f as i64,
                _ => {
                    self.report(path, format!("expected integer, received {n}"));
                    return None;
                }
            },
        };
        if int < range.min {
            self.report(path, format!("must be greater than or equal to {}", range.min));
            return None;
        }
        if int > range.max {
            self.report(path, format!("must be less than or equal to {}", range.max));
            return None;
        }
        Some(int)
    }

    fn integer(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        range: Range,
    ) -> Option<i64> {
        let value = self.required(obj, key, path)?;
        self.integer_value(value, join(path, key), range)
    }

    fn integer_or(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        range: Range,
        default: i64,
    ) -> Option<i64> {
        match obj.get(key) {
            None => Some(default),
            Some(value) => self.integer_value(value, join(path, key), range),
        }
    }

    fn timestamp(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<String> {
        let value = obj.get(key)?;
        let Value::String(s) = value else {
            self.report(
                join(path, key),
                format!("expected string, received {}", type_name(value)),
            );
            return None;
        };
        if DateTime::parse_from_rfc3339(s).is_err() {
            self.report(join(path, key), format!("invalid datetime '{s}'"));
            return None;
        }
        Some(s.clone())
    }

    fn array<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<&'a Vec<Value>> {
        match self.required(obj, key, path)? {
            Value::Array(items) => Some(items),
            other => {
                self.report(
                    join(path, key),
                    format!("expected array, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn point(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<Point> {
        let point_path = join(path, key);
        let value = self.required(obj, key, path)?;
        let map = self.object(value, &point_path)?;
        let coord = Range::between(-COORD_LIMIT_MM, COORD_LIMIT_MM);
        let x = self.integer(map, "x", &point_path, coord);
        let y = self.integer(map, "y", &point_path, coord);
        Some(Point::new(x?, y?))
    }

    fn wall(&mut self, value: &Value, path: &str) -> Option<Wall> {
        let obj = self.object(value, path)?;
        let id = self.id(obj, path, IdKind::Wall);
        let a = self.point(obj, "a", path);
        let b = self.point(obj, "b", path);
        let thickness_mm = self.integer(
            obj,
            "thicknessMm",
            path,
            Range::between(WALL_THICKNESS_MIN, WALL_THICKNESS_MAX),
        );
        let height_mm = self.integer_or(
            obj,
            "heightMm",
            path,
            Range::between(WALL_HEIGHT_MIN, WALL_HEIGHT_MAX),
            WALL_HEIGHT_DEFAULT,
        );
        Some(Wall {
            id: id?,
            a: a?,
            b: b?,
            thickness_mm: thickness_mm?,
            height_mm: height_mm?,
        })
    }

    fn opening_type(&mut self, obj: &Map<String, Value>, path: &str) -> Option<OpeningType> {
        let raw = self.string(obj, "type", path)?;
        match raw.as_str() {
            "door" => Some(OpeningType::Door),
            "window" => Some(OpeningType::Window),
            other => {
                self.report(
                    join(path, "type"),
                    format!("invalid value '{other}': expected 'door' or 'window'"),
                );
                None
            }
        }
    }

    fn opening(&mut self, value: &Value, path: &str) -> Option<Opening> {
        let obj = self.object(value, path)?;
        let id = self.id(obj, path, IdKind::Opening);
        let wall_id = self.string(obj, "wallId", path);
        let kind = self.opening_type(obj, path);
        let offset_mm = self.integer(obj, "offsetMm", path, Range::between(0, COORD_LIMIT_MM));
        let width_mm = self.integer(
            obj,
            "widthMm",
            path,
            Range::between(OPENING_WIDTH_MIN, OPENING_WIDTH_MAX),
        );
        let height_mm = self.integer(
            obj,
            "heightMm",
            path,
            Range::between(OPENING_HEIGHT_MIN, OPENING_HEIGHT_MAX),
        );
        let sill_height_mm = self.integer_or(
            obj,
            "sillHeightMm",
            path,
            Range::between(OPENING_SILL_MIN, OPENING_SILL_MAX),
            0,
        );
        Some(Opening {
            id: id?,
            wall_id: wall_id?,
            kind: kind?,
            offset_mm: offset_mm?,
            width_mm: width_mm?,
            height_mm: height_mm?,
            sill_height_mm: sill_height_mm?,
        })
    }

    /// Check every element; `None` if any element failed.
    fn each<T>(
        &mut self,
        items: &[Value],
        path: &str,
        mut check: impl FnMut(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<Vec<T>> {
        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match check(self, item, &index(path, i)) {
                Some(v) => out.push(v),
                None => ok = false,
            }
        }
        ok.then_some(out)
    }

    fn level(&mut self, value: &Value, path: &str) -> Option<Level> {
        let obj = self.object(value, path)?;
        let id = self.id(obj, path, IdKind::Level);
        let name = self.string(obj, "name", path);
        let walls = self
            .array(obj, "walls", path)
            .and_then(|items| self.each(items, &join(path, "walls"), Self::wall));
        let openings = self
            .array(obj, "openings", path)
            .and_then(|items| self.each(items, &join(path, "openings"), Self::opening));
        Some(Level {
            id: id?,
            name: name?,
            walls: walls?,
            openings: openings?,
        })
    }

    fn project(&mut self, value: &Value) -> Option<Project> {
        let obj = self.object(value, "")?;
        let id = self.id(obj, "", IdKind::Project);
        let name = self.string(obj, "name", "");
        let units = self.string(obj, "units", "").and_then(|u| {
            if u == UNITS_MM {
                Some(u)
            } else {
                self.report("units".to_string(), format!("invalid value '{u}': expected 'mm'"));
                None
            }
        });
        let levels = self.array(obj, "levels", "").and_then(|items| {
            if items.is_empty() {
                self.report("levels".to_string(), "must contain at least 1 level");
                return None;
            }
            self.each(items, "levels", Self::level)
        });
        let created_at = self.timestamp(obj, "createdAt", "");
        let updated_at = self.timestamp(obj, "updatedAt", "");
        Some(Project {
            id: id?,
            name: name?,
            units: units?,
            levels: levels?,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_project() -> Value {
        json!({
            "id": "p1",
            "name": "Test",
            "units": "mm",
            "levels": [{
                "id": "l1",
                "name": "Ground",
                "walls": [
                    {"id": "w1", "a": {"x": 0, "y": 0}, "b": {"x": 5000, "y": 0}, "thicknessMm": 200, "heightMm": 2700}
                ],
                "openings": [
                    {"id": "o1", "wallId": "w1", "type": "door", "offsetMm": 500, "widthMm": 900, "heightMm": 2100, "sillHeightMm": 0}
                ]
            }],
            "createdAt": "2026-01-01T00:00:00.000Z"
        })
    }

    #[test]
    fn valid_project_parses() {
        let project = parse_project(&valid_project()).expect("should parse");
        assert_eq!(project.id, "p1");
        assert_eq!(project.levels[0].walls[0].thickness_mm, 200);
        assert_eq!(project.levels[0].openings[0].kind, OpeningType::Door);
        assert_eq!(
            project.created_at.as_deref(),
            Some("2026-01-01T00:00:00.000Z")
        );
        assert!(project.updated_at.is_none());
    }

    #[test]
    fn defaults_fill_missing_optional_fields() {
        let mut data = valid_project();
        data["levels"][0]["walls"][0]
            .as_object_mut()
            .unwrap()
            .remove("heightMm");
        data["levels"][0]["openings"][0]
            .as_object_mut()
            .unwrap()
            .remove("sillHeightMm");
        let project = parse_project(&data).expect("should parse");
        assert_eq!(project.levels[0].walls[0].height_mm, WALL_HEIGHT_DEFAULT);
        assert_eq!(project.levels[0].openings[0].sill_height_mm, 0);
    }

    #[test]
    fn integral_floats_are_accepted() {
        let mut data = valid_project();
        data["levels"][0]["walls"][0]["thicknessMm"] = json!(250.0);
        let project = parse_project(&data).expect("should parse");
        assert_eq!(project.levels[0].walls[0].thickness_mm, 250);
    }

    #[test]
    fn fractional_numbers_are_rejected() {
        let mut data = valid_project();
        data["levels"][0]["walls"][0]["a"]["x"] = json!(0.5);
        let err = parse_project(&data).expect_err("fraction should fail");
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].path, "levels[0].walls[0].a.x");
        assert!(err.issues[0].message.contains("integer"));
    }

    #[test]
    fn every_violation_is_reported() {
        let mut data = valid_project();
        data["units"] = json!("inch");
        data["levels"][0]["walls"][0]["thicknessMm"] = json!(50);
        data["levels"][0]["openings"][0]["type"] = json!("hatch");
        data["levels"][0]["openings"][0]["widthMm"] = json!(5000);
        let err = parse_project(&data).expect_err("should fail");
        let paths: Vec<&str> = err.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "units",
                "levels[0].walls[0].thicknessMm",
                "levels[0].openings[0].type",
                "levels[0].openings[0].widthMm",
            ]
        );
    }

    #[test]
    fn coordinates_and_offsets_stay_in_safe_integer_range() {
        let mut data = valid_project();
        data["levels"][0]["walls"][0]["a"]["x"] = json!(-i64::MAX);
        data["levels"][0]["walls"][0]["b"]["x"] = json!(i64::MAX);
        data["levels"][0]["openings"][0]["offsetMm"] = json!(i64::MAX);
        let err = parse_project(&data).expect_err("out of range");
        let paths: Vec<&str> = err.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "levels[0].walls[0].a.x",
                "levels[0].walls[0].b.x",
                "levels[0].openings[0].offsetMm"
            ]
        );

        let mut data = valid_project();
        data["levels"][0]["walls"][0]["b"]["x"] = json!(COORD_LIMIT_MM);
        data["levels"][0]["openings"][0]["offsetMm"] = json!(COORD_LIMIT_MM - 900);
        let project = parse_project(&data).expect("limit is inclusive");
        assert!(crate::validation::validate_project(&project).is_empty());
    }

    #[test]
    fn missing_fields_are_required() {
        let err = parse_project(&json!({"id": "p1"})).expect_err("should fail");
        let paths: Vec<&str> = err.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "units", "levels"]);
        assert!(err.issues.iter().all(|i| i.message == "required"));
    }

    #[test]
    fn non_object_root_is_reported_not_panicked() {
        for data in [json!(null), json!(42), json!("p1"), json!([1, 2])] {
            let err = parse_project(&data).expect_err("should fail");
            assert_eq!(err.issues.len(), 1);
            assert_eq!(err.issues[0].path, "");
            assert!(err.issues[0].message.starts_with("expected object"));
        }
    }

    #[test]
    fn empty_levels_are_rejected() {
        let mut data = valid_project();
        data["levels"] = json!([]);
        let err = parse_project(&data).expect_err("should fail");
        assert_eq!(err.issues[0].path, "levels");
    }

    #[test]
    fn bad_id_pattern_is_rejected() {
        let mut data = valid_project();
        data["levels"][0]["walls"][0]["id"] = json!("wall-1");
        let err = parse_project(&data).expect_err("should fail");
        assert_eq!(err.issues[0].path, "levels[0].walls[0].id");
    }

    #[test]
    fn invalid_timestamp_is_rejected() {
        let mut data = valid_project();
        data["updatedAt"] = json!("yesterday");
        let err = parse_project(&data).expect_err("should fail");
        assert_eq!(err.issues[0].path, "updatedAt");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut data = valid_project();
        data["levels"][0]["walls"][0]["color"] = json!("red");
        assert!(parse_project(&data).is_ok());
    }

    #[test]
    fn invalid_json_text_is_a_root_issue() {
        let err = parse_project_str("{not json").expect_err("should fail");
        assert_eq!(err.issues.len(), 1);
        assert!(err.issues[0].message.starts_with("invalid JSON"));
    }

    #[test]
    fn safe_parse_serializes_success_flag() {
        let ok = serde_json::to_value(safe_parse_project(&valid_project())).expect("serialize");
        assert_eq!(ok["success"], true);
        assert_eq!(ok["project"]["id"], "p1");

        let failed = safe_parse_project(&json!({}));
        assert!(!failed.is_success());
        let value = serde_json::to_value(&failed).expect("serialize");
        assert_eq!(value["success"], false);
        assert!(value["errors"].as_array().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn schema_error_display_lists_all_issues() {
        let err = parse_project(&json!({"id": "p1"})).expect_err("should fail");
        let text = err.to_string();
        assert!(text.contains("name: required"));
        assert!(text.contains("levels: required"));
    }

    #[test]
    fn empty_project_has_one_empty_level() {
        let project = create_empty_project("New Plan");
        assert_eq!(project.name, "New Plan");
        assert_eq!(project.units, "mm");
        assert_eq!(project.levels.len(), 1);
        assert!(project.levels[0].walls.is_empty());
        assert!(project.levels[0].openings.is_empty());
        assert!(project.created_at.is_some());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn empty_project_survives_schema_round_trip() {
        let project = create_empty_project("Round Trip");
        let value = serde_json::to_value(&project).expect("to_value");
        let parsed = parse_project(&value).expect("should parse");
        assert_eq!(parsed, project);
    }
}
