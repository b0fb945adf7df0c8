//! Parsers for the boundary CSV files.
//!
//! Two files feed the system:
//! - catalog: `id,title,genres,runtimeMinutes,averageRating`
//! - users:   `user_id,preferred_genres,average_watch_time,favorite_movies`
//!
//! Genre and favorite lists are comma-joined inside a single (usually quoted)
//! column, so records are split with a quote-aware scanner rather than a
//! plain `split(',')`. A header row is recognized by its first field and
//! skipped.

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Split one CSV record into fields, honoring double quotes.
///
/// Inside a quoted field a doubled quote (`""`) is an escaped quote;
/// separators inside quotes do not split.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Split a comma-joined label field into trimmed, non-empty labels
fn parse_label_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_error(file: &Path, line: usize, reason: impl Into<String>) -> CatalogError {
    CatalogError::ParseError {
        file: file.display().to_string(),
        line,
        reason: reason.into(),
    }
}

fn expect_fields<'a>(
    fields: &'a [String],
    expected: usize,
    file: &Path,
    line: usize,
) -> Result<&'a [String]> {
    if fields.len() != expected {
        return Err(parse_error(
            file,
            line,
            format!("expected {} fields, found {}", expected, fields.len()),
        ));
    }
    Ok(fields)
}

/// Parse the catalog file into raw records.
///
/// Empty `runtimeMinutes` / `averageRating` fields become `None`; all other
/// malformed values are errors with line context.
pub fn parse_catalog(path: &Path) -> Result<Vec<CatalogRecord>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields = split_record(trimmed);
        // Header row
        if line_no == 1 && fields.first().map(String::as_str) == Some("id") {
            continue;
        }
        let fields = expect_fields(&fields, 5, path, line_no)?;

        let runtime_minutes = match fields[3].trim() {
            "" => None,
            s => Some(s.parse::<u32>().map_err(|e| {
                parse_error(path, line_no, format!("invalid runtimeMinutes: {}", e))
            })?),
        };
        let average_rating = match fields[4].trim() {
            "" => None,
            s => Some(s.parse::<f32>().map_err(|e| {
                parse_error(path, line_no, format!("invalid averageRating: {}", e))
            })?),
        };

        records.push(CatalogRecord {
            id: fields[0].trim().to_string(),
            title: fields[1].trim().to_string(),
            genres: parse_label_list(&fields[2]),
            runtime_minutes,
            average_rating,
        });
    }

    Ok(records)
}

/// Parse the users file into profiles.
///
/// A profile must carry at least one preferred genre and a positive watch
/// time; anything else is rejected up front rather than surfacing later as a
/// degenerate recommendation request.
pub fn parse_users(path: &Path) -> Result<Vec<UserProfile>> {
    let content = fs::read_to_string(path)?;
    let mut profiles = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields = split_record(trimmed);
        if line_no == 1 && fields.first().map(String::as_str) == Some("user_id") {
            continue;
        }
        let fields = expect_fields(&fields, 4, path, line_no)?;

        let preferred_genres = parse_label_list(&fields[1]);
        if preferred_genres.is_empty() {
            return Err(parse_error(path, line_no, "empty preferred_genres"));
        }

        let average_watch_time: u32 = fields[2].trim().parse().map_err(|e| {
            parse_error(path, line_no, format!("invalid average_watch_time: {}", e))
        })?;
        if average_watch_time == 0 {
            return Err(CatalogError::InvalidValue {
                field: "average_watch_time".to_string(),
                value: fields[2].trim().to_string(),
            });
        }

        let favorite_movies: HashSet<ItemId> =
            parse_label_list(&fields[3]).into_iter().collect();

        profiles.push(UserProfile {
            user_id: fields[0].trim().to_string(),
            preferred_genres,
            average_watch_time,
            favorite_movies,
        });
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_record_plain() {
        assert_eq!(split_record("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_record_quoted_separator() {
        assert_eq!(
            split_record(r#"tt1,Heat,"Action, Crime",170,8.3"#),
            vec!["tt1", "Heat", "Action, Crime", "170", "8.3"]
        );
    }

    #[test]
    fn test_split_record_escaped_quote() {
        assert_eq!(
            split_record(r#""He said ""hi""",b"#),
            vec![r#"He said "hi""#, "b"]
        );
    }

    #[test]
    fn test_parse_label_list_trims_and_drops_empties() {
        assert_eq!(
            parse_label_list(" Action , Drama ,, Sci-Fi "),
            vec!["Action", "Drama", "Sci-Fi"]
        );
        assert!(parse_label_list("").is_empty());
    }

    #[test]
    fn test_parse_catalog_file() {
        let dir = std::env::temp_dir().join("catalog_parser_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.csv");
        fs::write(
            &path,
            "id,title,genres,runtimeMinutes,averageRating\n\
             tt1,Heat,\"Action, Crime\",170,8.3\n\
             tt2,Unrated,Drama,,\n",
        )
        .unwrap();

        let records = parse_catalog(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "tt1");
        assert_eq!(records[0].genres, vec!["Action", "Crime"]);
        assert_eq!(records[0].runtime_minutes, Some(170));
        assert_eq!(records[0].average_rating, Some(8.3));
        assert_eq!(records[1].runtime_minutes, None);
        assert_eq!(records[1].average_rating, None);
    }

    #[test]
    fn test_parse_catalog_rejects_bad_runtime() {
        let dir = std::env::temp_dir().join("catalog_parser_bad_runtime");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.csv");
        fs::write(&path, "tt1,Heat,Action,abc,8.3\n").unwrap();

        let err = parse_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_parse_users_file() {
        let dir = std::env::temp_dir().join("catalog_parser_users");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("users.csv");
        fs::write(
            &path,
            "user_id,preferred_genres,average_watch_time,favorite_movies\n\
             user_scifi,\"Sci-Fi, Thriller\",130,\"tt5, tt6\"\n\
             user_plain,Drama,90,\n",
        )
        .unwrap();

        let profiles = parse_users(&path).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].user_id, "user_scifi");
        assert_eq!(profiles[0].preferred_genres, vec!["Sci-Fi", "Thriller"]);
        assert_eq!(profiles[0].average_watch_time, 130);
        assert!(profiles[0].favorite_movies.contains("tt5"));
        assert!(profiles[1].favorite_movies.is_empty());
    }

    #[test]
    fn test_parse_users_rejects_empty_genres() {
        let dir = std::env::temp_dir().join("catalog_parser_users_bad");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("users.csv");
        fs::write(&path, "user_x,,120,\n").unwrap();

        assert!(parse_users(&path).is_err());
    }
}
