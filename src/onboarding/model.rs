use serde_json::Value;

/// Capability surface a submission is applied through.
///
/// The handler addresses profile attributes by their wire name and never
/// assumes which ones a record actually carries: a name the record does not
/// expose is skipped, not an error.
pub trait ProfileFields {
    fn has_field(&self, name: &str) -> bool;

    fn get_field(&self, name: &str) -> Option<Value>;

    /// Set `name` to `value`. Implementations ignore names they do not
    /// carry and values of the wrong shape; validation happens upstream.
    fn set_field(&mut self, name: &str, value: Value);
}
