//! Reload client injection.
//!
//! Rewrites served HTML to embed the live reload client script. The rewrite
//! is purely textual; the document is never parsed or validated.

/// Client script injected into every served HTML document.
///
/// Opens an `EventSource` to `/__livereload`; any message schedules a single
/// full page reload after a short settle delay, absorbing duplicate
/// notifications client-side. Reconnection after a dropped connection is
/// EventSource's built-in behavior, so `onerror` stays quiet.
const RELOAD_SCRIPT: &str = "\n<script>\n\
(() => {\n\
  const source = new EventSource('/__livereload');\n\
  let pending = false;\n\
  source.onmessage = () => {\n\
    if (pending) return;\n\
    pending = true;\n\
    setTimeout(() => {\n\
      pending = false;\n\
      window.location.reload();\n\
    }, 50);\n\
  };\n\
  source.onerror = () => {\n\
    // EventSource reconnects on its own.\n\
  };\n\
})();\n\
</script>\n";

/// Insert the reload client script into an HTML document.
///
/// The script lands immediately before the first `</body>` tag, or at the
/// very end when the document has none. All original content is preserved.
pub(crate) fn inject_reload_script(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", &format!("{RELOAD_SCRIPT}</body>"), 1)
    } else {
        format!("{html}{RELOAD_SCRIPT}")
    }
}
