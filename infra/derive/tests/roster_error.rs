use roster_derive::roster_error;
use std::borrow::Cow;

#[roster_error]
pub enum DemoError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Activity not found: {name}")]
    Missing { name: String },

    #[error("Internal fault{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

#[test]
fn source_converts_with_question_mark() {
    fn run() -> Result<(), DemoError> {
        failing_io()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "I/O failure: gone");
}

#[test]
fn context_is_attached_to_source_results() {
    let err = failing_io().context("reading catalog").unwrap_err();
    assert_eq!(err.to_string(), "I/O failure (reading catalog): gone");
}

#[test]
fn context_is_attached_to_own_results() {
    let res: Result<(), DemoError> = Err("boom".into());
    let err = res.context("startup").unwrap_err();
    assert_eq!(err.to_string(), "Internal fault (startup): boom");
}

#[test]
fn context_is_ignored_for_variants_without_it() {
    let res: Result<(), DemoError> = Err(DemoError::Missing { name: "Chess Club".to_owned() });
    let err = res.context("ignored").unwrap_err();
    assert_eq!(err.to_string(), "Activity not found: Chess Club");
}

#[test]
fn internal_accepts_owned_strings() {
    let err = DemoError::from(format!("seed has {} entries", 0));
    assert!(matches!(err, DemoError::Internal { .. }));
    assert_eq!(err.to_string(), "Internal fault: seed has 0 entries");
}
