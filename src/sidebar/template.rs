/// Replaces every `${key}` in `template` with its value, one key at a time in
/// the order given. Placeholders without a field stay as they are and values
/// are inserted verbatim, markup included.
pub fn fill(template: &str, fields: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (key, value) in fields {
        let placeholder = format!("${{{key}}}");
        output = output.replace(&placeholder, value);
    }
    output
}
