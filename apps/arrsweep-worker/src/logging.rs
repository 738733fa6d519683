use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Builds the subscriber filter from the configured log level.
///
/// Values containing `=` or `,` are parsed as full filter directives. Anything else is read
/// as a level name.
pub fn env_filter(log_level: &str) -> EnvFilter {
	let log_level = log_level.trim();

	if log_level.contains(['=', ','])
		&& let Ok(filter) = EnvFilter::try_new(log_level)
	{
		return filter;
	}

	EnvFilter::builder().with_default_directive(level_filter(log_level).into()).parse_lossy("")
}

/// Case-insensitive level name, accepting `warning` and `critical`/`fatal` spellings.
///
/// Unknown names fall back to `info`.
pub fn level_filter(log_level: &str) -> LevelFilter {
	match log_level.trim().to_ascii_lowercase().as_str() {
		"trace" | "notset" => LevelFilter::TRACE,
		"debug" => LevelFilter::DEBUG,
		"info" => LevelFilter::INFO,
		"warn" | "warning" => LevelFilter::WARN,
		"error" | "critical" | "fatal" => LevelFilter::ERROR,
		"off" => LevelFilter::OFF,
		_ => LevelFilter::INFO,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn level_names_are_case_insensitive() {
		assert_eq!(level_filter("INFO"), LevelFilter::INFO);
		assert_eq!(level_filter("Debug"), LevelFilter::DEBUG);
		assert_eq!(level_filter(" error "), LevelFilter::ERROR);
	}

	#[test]
	fn long_level_spellings_are_accepted() {
		assert_eq!(level_filter("WARNING"), LevelFilter::WARN);
		assert_eq!(level_filter("CRITICAL"), LevelFilter::ERROR);
		assert_eq!(level_filter("fatal"), LevelFilter::ERROR);
	}

	#[test]
	fn unknown_levels_fall_back_to_info() {
		assert_eq!(level_filter("verbose"), LevelFilter::INFO);
		assert_eq!(level_filter(""), LevelFilter::INFO);
	}

	#[test]
	fn bare_words_never_silence_errors() {
		for level in ["WARNING", "CRITICAL", "verbose", "INFO"] {
			let hint = env_filter(level).max_level_hint();

			assert!(
				hint.is_some_and(|hint| hint >= LevelFilter::ERROR),
				"Level {level:?} produced filter hint {hint:?}."
			);
		}

		assert_eq!(env_filter("WARNING").max_level_hint(), Some(LevelFilter::WARN));
		assert_eq!(env_filter("verbose").max_level_hint(), Some(LevelFilter::INFO));
	}

	#[test]
	fn directive_strings_are_passed_through() {
		let filter = env_filter("warn,arrsweep_service=debug");

		assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
	}

	#[test]
	fn invalid_directive_strings_fall_back_to_info() {
		let filter = env_filter("arrsweep_service=loud");

		assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
	}
}
