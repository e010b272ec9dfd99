pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/x-www-form-urlencoded`.
    fn common_get_content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }
}
