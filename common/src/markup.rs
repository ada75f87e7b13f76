/// Builds the `<img>` tag pointing at the avatar served under `base_url`.
///
/// Neither `base_url` nor `key` is escaped. A key containing `"` or `>` breaks
/// out of the attribute, so only pass keys that are known to be safe.
pub fn markup(
    base_url: &str,
    key: &str,
    width: impl itoa::Integer,
    height: impl itoa::Integer,
) -> String {
    let mut num_buf = itoa::Buffer::new();
    let mut tag = String::with_capacity(64 + base_url.len() + 2 * key.len());

    tag.push_str("<img src=\"");
    tag.push_str(base_url);
    tag.push_str(key);
    tag.push_str(".png\" width=\"");
    tag.push_str(num_buf.format(width));
    tag.push_str("\" height=\"");
    tag.push_str(num_buf.format(height));
    tag.push_str("\" alt=\"Avatar ");
    tag.push_str(key);
    tag.push_str("\">");

    tag
}
