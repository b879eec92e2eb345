//! Placeholder lib target; all content lives in the `tests/` directory.
