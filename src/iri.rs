use url::Url;

/// Lower-case hex MD5 digest of `signature`, used to build stable identifiers
/// from natural keys (e-mail addresses, accession numbers).
pub fn hash_iri_signature(signature: &str) -> String {
    let hash = format!("{:x}", md5::compute(signature));
    tracing::trace!(%hash, signature, "hashed identifier signature");
    hash
}

/// Form-encodes `raw` so it can be embedded in an IRI path or query.
pub fn url_encode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Lower-cases `raw` and replaces spaces with underscores.
pub fn slugify(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_")
}

/// Parses `raw` as an absolute IRI and returns its normalised form.
pub fn parse_iri(raw: &str) -> Result<String, url::ParseError> {
    Url::parse(raw).map(String::from)
}
