//! crates/codesnack_core/src/practice.rs
//!
//! The practice arena: canned HTML/CSS/JS exercises and the sandboxed preview
//! document that wraps a learner's edited code.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeActivity {
    BasicHtmlPage,
    CssStylingExample,
    SimpleJsAlert,
    InteractiveButton,
}

impl PracticeActivity {
    pub const ALL: [PracticeActivity; 4] = [
        PracticeActivity::BasicHtmlPage,
        PracticeActivity::CssStylingExample,
        PracticeActivity::SimpleJsAlert,
        PracticeActivity::InteractiveButton,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PracticeActivity::BasicHtmlPage => "Basic HTML Page",
            PracticeActivity::CssStylingExample => "CSS Styling Example",
            PracticeActivity::SimpleJsAlert => "Simple JS Alert",
            PracticeActivity::InteractiveButton => "Interactive Button",
        }
    }

    pub fn starter_code(self) -> &'static str {
        match self {
            PracticeActivity::BasicHtmlPage => {
                r#"
<!DOCTYPE html>
<html>
  <body>
    <h1>Welcome!</h1>
    <p>This is a basic HTML page.</p>
  </body>
</html>
"#
            }
            PracticeActivity::CssStylingExample => {
                r#"
<!DOCTYPE html>
<html>
  <head>
    <style>
      p { color: blue; font-size: 20px; }
    </style>
  </head>
  <body>
    <p>This paragraph is styled with CSS!</p>
  </body>
</html>
"#
            }
            PracticeActivity::SimpleJsAlert => {
                r#"
<!DOCTYPE html>
<html>
  <body>
    <h2>Click the button for a message</h2>
    <button onclick="alert('Hello from JavaScript!')">Click Me</button>
  </body>
</html>
"#
            }
            PracticeActivity::InteractiveButton => {
                r#"
<!DOCTYPE html>
<html>
  <body>
    <button onclick="document.getElementById('demo').innerHTML='You clicked me!'">Click me</button>
    <p id="demo"></p>
  </body>
</html>
"#
            }
        }
    }
}

/// Wraps learner code in the white preview card.
///
/// The code is inserted verbatim; isolation comes from serving the result
/// into a sandboxed frame, not from escaping.
pub fn sandbox_preview(code: &str) -> String {
    format!(
        r#"
<div style="background-color:white; padding: 20px; border-radius: 10px; box-shadow: 0 0 10px rgba(0,0,0,0.1);">
    {code}
</div>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_activity_has_an_html_starter() {
        for activity in PracticeActivity::ALL {
            let code = activity.starter_code();
            assert!(code.trim_start().starts_with("<!DOCTYPE html>"), "{}", activity.name());
            assert!(code.trim_end().ends_with("</html>"), "{}", activity.name());
        }
    }

    #[test]
    fn preview_embeds_code_unchanged() {
        let code = "<button onclick=\"alert('x')\">Go</button>";
        let html = sandbox_preview(code);
        assert!(html.contains(code));
        assert!(html.contains("background-color:white"));
    }
}
