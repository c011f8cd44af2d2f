//! Explicit key/value persistence for [`Options`] and [`Paints`].
//!
//! Callers own the parameter map (typically a URL query string or a config file) and pass it
//! in; nothing here reads or writes ambient state. Keys that are not ours are left alone, and
//! values that fail to parse are skipped so a merge never drops a field.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::foundation::geometry::Rect;
use crate::options::model::{MAX_GLYPH_MORPH_MILLIS, Options, OptionsPatch};
use crate::render::paints::{Color, Paints};

/// Ordered string parameters.
pub type Params = BTreeMap<String, String>;

/// Joins list-valued parameters such as `alignment` and `colors`.
pub const LIST_SEPARATOR: &str = "__";

pub const KEY_FORMAT: &str = "format";
pub const KEY_GLYPH_MORPH_MILLIS: &str = "glyphMorphMillis";
pub const KEY_SPACING_PX: &str = "spacingPx";
pub const KEY_ALIGNMENT: &str = "alignment";
pub const KEY_LAYOUT: &str = "layout";
pub const KEY_BACKGROUND_COLOR: &str = "backgroundColor";
pub const KEY_BOUNDS: &str = "bounds";
pub const KEY_COLORS: &str = "colors";
/// Persisted value of a cleared background.
pub const NO_BACKGROUND: &str = "none";

/// Write every option into `params`, preserving unrelated keys.
pub fn options_to_params(options: &Options, params: &mut Params) {
    params.insert(KEY_FORMAT.to_string(), options.format.name().to_string());
    params.insert(
        KEY_GLYPH_MORPH_MILLIS.to_string(),
        options.glyph_morph_millis.to_string(),
    );
    params.insert(KEY_SPACING_PX.to_string(), format_number(options.spacing_px));
    params.insert(KEY_ALIGNMENT.to_string(), options.alignment.to_string());
    params.insert(KEY_LAYOUT.to_string(), options.layout.name().to_string());
    let background = options
        .background_color
        .map_or_else(|| NO_BACKGROUND.to_string(), |c| c.to_string());
    params.insert(KEY_BACKGROUND_COLOR.to_string(), background);
    let b = options.bounds;
    let bounds = [b.left(), b.top(), b.right(), b.bottom()]
        .map(format_number)
        .join(LIST_SEPARATOR);
    params.insert(KEY_BOUNDS.to_string(), bounds);
}

/// Read whatever options `params` carries. Missing or invalid values stay unset.
pub fn params_to_patch(params: &Params) -> OptionsPatch {
    OptionsPatch {
        format: parse_param(params, KEY_FORMAT),
        glyph_morph_millis: parse_param::<u32>(params, KEY_GLYPH_MORPH_MILLIS)
            .filter(|&ms| accept(ms <= MAX_GLYPH_MORPH_MILLIS, KEY_GLYPH_MORPH_MILLIS, ms)),
        spacing_px: parse_param::<f64>(params, KEY_SPACING_PX)
            .filter(|&px| accept(px.is_finite() && px >= 0.0, KEY_SPACING_PX, px)),
        alignment: parse_param(params, KEY_ALIGNMENT),
        layout: parse_param(params, KEY_LAYOUT),
        background_color: parse_background(params),
        bounds: params.get(KEY_BOUNDS).and_then(|raw| parse_bounds(raw)),
    }
}

/// `defaults` overlaid with whatever `params` carries.
pub fn restore_options(defaults: &Options, params: &Params) -> Options {
    defaults.merge(&params_to_patch(params))
}

pub fn paints_to_params(paints: &Paints, params: &mut Params) {
    let colors = paints
        .colors
        .iter()
        .map(Color::to_string)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);
    params.insert(KEY_COLORS.to_string(), colors);
}

/// `defaults` with the persisted palette applied.
///
/// The palette is only replaced when every entry parses and the count matches the defaults,
/// since glyph designs index colors by position.
pub fn params_to_paints(defaults: &Paints, params: &Params) -> Paints {
    let mut out = defaults.clone();
    let Some(raw) = params.get(KEY_COLORS).filter(|s| !s.is_empty()) else {
        return out;
    };
    let colors = raw
        .split(LIST_SEPARATOR)
        .map(str::parse::<Color>)
        .collect::<Result<Vec<_>, _>>();
    match colors {
        Ok(colors) if colors.len() == defaults.colors.len() => out.colors = colors,
        Ok(colors) => tracing::warn!(
            expected = defaults.colors.len(),
            got = colors.len(),
            "ignoring persisted palette of the wrong size"
        ),
        Err(e) => tracing::warn!(error = %e, "ignoring invalid persisted palette"),
    }
    out
}

/// Split `a=1&b=2` (an optional leading `?` is ignored) into a map, percent-decoding both sides.
pub fn parse_query(query: &str) -> Params {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (percent_decode(k), percent_decode(v)),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

/// Inverse of [`parse_query`], without the leading `?`.
pub fn to_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_param<T>(params: &Params, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = params.get(key)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid setting");
            None
        }
    }
}

/// Missing key: leave the background alone. `none` (or empty): clear it.
fn parse_background(params: &Params) -> Option<Option<Color>> {
    match params.get(KEY_BACKGROUND_COLOR).map(|raw| raw.trim()) {
        None => None,
        Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case(NO_BACKGROUND) => Some(None),
        Some(_) => parse_param(params, KEY_BACKGROUND_COLOR).map(Some),
    }
}

fn accept(ok: bool, key: &str, value: impl Display) -> bool {
    if !ok {
        tracing::warn!(key, value = %value, "ignoring out-of-range setting");
    }
    ok
}

fn parse_bounds(raw: &str) -> Option<Rect> {
    let values = raw
        .split(LIST_SEPARATOR)
        .map(|v| v.trim().parse::<f64>().ok().filter(|f| f.is_finite()))
        .collect::<Option<Vec<_>>>();
    match values.as_deref() {
        Some(&[l, t, r, b]) => Some(Rect::new(l, t, r, b)),
        _ => {
            tracing::warn!(value = raw, "ignoring invalid bounds");
            None
        }
    }
}

/// Fixed three decimals with trailing zeros trimmed.
fn format_number(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                {
                    Some(v) => {
                        out.push(v);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/options/settings.rs"]
mod tests;
