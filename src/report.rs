//! HTML report rendering. Pure string formatting over an assembled batch;
//! no decision logic lives here.

use crate::assembler::AssembledReport;
use crate::signal::Signal;

pub const ENV_LOGO_URL: &str = "REPORT_LOGO_URL";

pub const REPORT_TITLE: &str = "🚀 Daily Intent Signal Report";

/// Render a self-contained HTML document for one report batch. Cell values
/// are escaped; the footer records whether the batch came from the live feed
/// or the generative fallback.
pub fn render(report: &AssembledReport) -> String {
    let logo = std::env::var(ENV_LOGO_URL).ok();
    render_with_logo(report, logo.as_deref())
}

fn render_with_logo(report: &AssembledReport, logo_url: Option<&str>) -> String {
    let logo_block = logo_url
        .map(|url| format!(r#"<img src="{}" style="height: 50px;">"#, esc(url)))
        .unwrap_or_default();

    let rows: String = report.signals.iter().map(render_row).collect();

    let footer = if report.primary_worked {
        "Sourced from live social listening"
    } else {
        "Generated via AI enrichment (live feed unavailable)"
    };

    format!(
        r##"<html>
<body style="font-family: Arial, sans-serif; font-size: 14px; color: #333;">
  <div style="text-align: center; margin-bottom: 20px;">
    {logo_block}
    <h2 style="color:#28A745;">{REPORT_TITLE}</h2>
  </div>
  <p>Today's enriched GTM &amp; intent signals for B2B SaaS, fintech, martech &amp; AI companies who may need revenue or GTM support:</p>
  <table border="1" cellpadding="8" cellspacing="0" width="100%" style="border-collapse: collapse;">
    <tr bgcolor="#d4edda">
      <th>Company</th><th>Location</th><th>Industry</th><th>Signal</th><th>Intent</th><th>Hook</th>
    </tr>
{rows}  </table>
  <p style="margin-top:20px;font-size:12px;color:#999;">
    {footer}
  </p>
</body>
</html>
"##
    )
}

fn render_row(s: &Signal) -> String {
    format!(
        "    <tr>\n      <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\n    </tr>\n",
        esc(&s.company),
        esc(&s.location),
        s.industry,
        esc(&s.signal),
        s.intent,
        esc(&s.hook),
    )
}

fn esc(s: &str) -> String {
    html_escape::encode_text(s).to_string()
}
