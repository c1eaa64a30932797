//! HTML rendering of the advisory page

use std::fmt::Write;

use serde::Serialize;
use shared::{CropList, IrrigationAdvice};

use crate::services::{AdvisoryReport, WeatherOutcome};

/// Merged result of one form submission
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReportView {
    /// Why the submitted form could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    /// URL of the annotated detection image
    pub result_image: Option<String>,
    /// User-facing reason detection did not produce an image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_error: Option<String>,
    pub weather: Option<WeatherOutcome>,
    pub crops: CropList,
    pub water: Option<IrrigationAdvice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_lookup_error: Option<String>,
}

impl ReportView {
    pub fn with_advisory(mut self, report: AdvisoryReport) -> Self {
        self.weather = Some(report.weather);
        self.crops = report.crops;
        self.water = report.water;
        self.water_lookup_error = report.water_lookup_error;
        self
    }
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Farm Advisor</title>
<style>
body { font-family: sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; }
section { border: 1px solid #ccc; border-radius: 6px; padding: 1rem; margin-top: 1rem; }
.error { color: #a00; }
img.result { max-width: 100%; }
</style>
</head>
<body>
<h1>Weed Detection &amp; Farm Advisor</h1>
<form method="post" action="/" enctype="multipart/form-data">
<p><label>Field image <input type="file" name="image" accept="image/*"></label></p>
<p><label>City (Maharashtra) <input type="text" name="city"></label></p>
<p><button type="submit">Analyze</button></p>
</form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page for `view`
pub fn render_page(view: &ReportView) -> String {
    let mut html = String::from(PAGE_HEAD);

    if let Some(message) = &view.form_error {
        let _ = write!(
            html,
            "<section><p class=\"error\">{}</p></section>\n",
            escape_html(message)
        );
    }

    if let Some(url) = &view.result_image {
        let _ = write!(
            html,
            "<section><h2>Detection Result</h2><img class=\"result\" src=\"{}\" alt=\"Detection result\"></section>\n",
            escape_html(url)
        );
    }
    if let Some(message) = &view.detection_error {
        let _ = write!(
            html,
            "<section><h2>Detection Result</h2><p class=\"error\">{}</p></section>\n",
            escape_html(message)
        );
    }

    match &view.weather {
        Some(WeatherOutcome::Observed(weather)) => {
            let _ = write!(
                html,
                "<section><h2>Weather in {}</h2><ul><li>Temperature: {} °C</li><li>Humidity: {} %</li><li>Rainfall (1h): {} mm</li></ul></section>\n",
                escape_html(&weather.city),
                weather.temperature,
                weather.humidity,
                weather.rainfall
            );
        }
        Some(WeatherOutcome::InvalidCity(rejection)) => {
            let _ = write!(
                html,
                "<section><p class=\"error\">{}</p></section>\n",
                escape_html(&rejection.error)
            );
        }
        Some(WeatherOutcome::Unavailable { error }) => {
            let _ = write!(
                html,
                "<section><p class=\"error\">{}</p></section>\n",
                escape_html(error)
            );
        }
        None => {}
    }

    if !view.crops.is_empty() {
        html.push_str("<section><h2>Recommended Crops</h2><ul>\n");
        for crop in &view.crops {
            let _ = writeln!(html, "<li>{}</li>", escape_html(crop));
        }
        html.push_str("</ul></section>\n");
    }

    if let Some(water) = &view.water {
        let _ = write!(
            html,
            "<section><h2>Water Management</h2><p><strong>Status:</strong> {}</p><p><strong>Irrigation:</strong> {}</p><p><strong>Warning:</strong> {}</p><p><strong>Source:</strong> {}</p>\n",
            escape_html(water.status.label()),
            escape_html(&water.irrigation),
            escape_html(&water.warning),
            escape_html(&water.source)
        );
        if let Some(message) = &view.water_lookup_error {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(message));
        }
        if !water.details.is_empty() {
            html.push_str("<table><tr><th>Name</th><th>Distance (km)</th><th>Location</th></tr>\n");
            for body in &water.details {
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td>{:.2}</td><td>{}, {}</td></tr>",
                    escape_html(&body.name),
                    body.distance,
                    body.lat,
                    body.lon
                );
            }
            html.push_str("</table>\n");
        }
        html.push_str("</section>\n");
    }

    html.push_str(PAGE_TAIL);
    html
}
