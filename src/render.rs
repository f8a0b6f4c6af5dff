//! Turns an [`ItemStack`] into markup.
//!
//! Rendering never fails. A tag that is illegal under the doctype in the
//! context, or that lacks its required attribute, is reported through
//! [`Diagnostics`](headtags_render_core::Diagnostics) and left out; every
//! other tag is still emitted.

use crate::item::{Item, ItemStack, KeyedMeta, LinkItem, MetaItem};
use crate::policy::{CharsetFormat, DoctypePolicy, policy_for};
use headtags_render_core::RenderContext;
use headtags_render_core::RenderWarning;
use headtags_render_core::utils::push_attribute;
use itertools::Itertools;

/// Renders `stack` in key order, with charset tags first.
pub fn render(stack: &ItemStack, ctx: &RenderContext<'_>) -> String {
    let (charsets, others): (Vec<&Item>, Vec<&Item>) =
        stack.values().partition(|item| item.is_charset());

    charsets
        .into_iter()
        .chain(others)
        .filter_map(|item| match render_item(item, ctx) {
            Ok(tag) => Some(tag),
            Err(warning) => {
                ctx.diagnostics.warn(&warning);
                None
            }
        })
        .map(|tag| format!("{}{}", ctx.indent, tag))
        .join(ctx.separator)
}

/// Renders one tag, conditional comment included.
pub fn render_item(item: &Item, ctx: &RenderContext<'_>) -> Result<String, RenderWarning> {
    let policy = policy_for(ctx.doctype);
    match item {
        Item::Link(link) => render_link(link, policy, ctx),
        Item::Meta(MetaItem::Keyed(meta)) => render_keyed_meta(meta, policy, ctx),
        Item::Meta(MetaItem::Charset(charset)) => render_charset(charset, policy, ctx),
    }
}

fn render_link(
    link: &LinkItem,
    policy: &DoctypePolicy,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderWarning> {
    if link.href().is_empty() {
        return Err(RenderWarning::MissingAttribute {
            tag: "link",
            attribute: "href",
        });
    }
    let mut tag = String::from("<link");
    push_attribute(&mut tag, ctx, "rel", link.rel().as_str());
    push_attribute(&mut tag, ctx, "href", link.href());
    for (name, value) in link.attributes() {
        push_attribute(&mut tag, ctx, name, value);
    }
    tag.push_str(policy.void_close());
    Ok(link.conditional().wrap(&tag))
}

fn render_keyed_meta(
    meta: &KeyedMeta,
    policy: &DoctypePolicy,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderWarning> {
    if !policy.allows(meta.meta_type()) {
        return Err(RenderWarning::IllegalMetaType {
            meta_type: meta.meta_type().attribute().to_string(),
            doctype: ctx.doctype,
        });
    }
    if !policy.scheme_modifier && meta.modifier("scheme").is_some() {
        return Err(RenderWarning::UnsupportedModifier {
            modifier: "scheme".to_string(),
            doctype: ctx.doctype,
        });
    }

    let mut tag = String::from("<meta");
    push_attribute(&mut tag, ctx, meta.meta_type().attribute(), meta.key());
    push_attribute(&mut tag, ctx, "content", meta.content());
    for (name, value) in meta.modifiers() {
        push_attribute(&mut tag, ctx, name, value);
    }
    tag.push_str(policy.void_close());
    Ok(meta.conditional().wrap(&tag))
}

fn render_charset(
    charset: &str,
    policy: &DoctypePolicy,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderWarning> {
    let close = match policy.charset {
        Some(CharsetFormat::Html) => ">",
        Some(CharsetFormat::Xml) => "/>",
        None => {
            return Err(RenderWarning::IllegalMetaType {
                meta_type: "charset".to_string(),
                doctype: ctx.doctype,
            });
        }
    };
    let mut tag = String::from("<meta");
    push_attribute(&mut tag, ctx, "charset", charset);
    tag.push_str(close);
    Ok(tag)
}
