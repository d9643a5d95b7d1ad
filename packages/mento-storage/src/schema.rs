pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_users.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_users.sql")),
				"tables/002_tags.sql" => out.push_str(include_str!("../../../sql/tables/002_tags.sql")),
				"tables/003_activities.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_activities.sql")),
				"tables/004_activity_tags.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_activity_tags.sql")),
				"tables/005_user_interests.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_user_interests.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn expands_every_table_include() {
		let sql = render_schema();

		assert!(!sql.contains("\\ir "));

		for table in ["users", "tags", "activities", "activity_tags", "user_interests"] {
			assert!(
				sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")),
				"Missing table {table}."
			);
		}
	}
}
