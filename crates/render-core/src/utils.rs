use crate::types::RenderContext;

/// Appends ` name="value"` with the value escaped per the context.
pub fn push_attribute(out: &mut String, ctx: &RenderContext<'_>, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&ctx.attribute(value));
    out.push('"');
}
