use std::fmt;
use std::io;
use std::io::BufRead;
use std::io::Write;

use serde::Serialize;

use super::color::Color;
use super::color::ColorError;
use super::viewer;
use super::viewer::Viewer;


pub type GEResult<T> = Result<T, Box<dyn std::error::Error>>;

const BASE_PROMPT: &'static str = "base color in hex (include #): ";
const OVERLAY_PROMPT: &'static str = "overlay color in hex (include #): ";
const TRANSPARENCY_PROMPT: &'static str = "transparency (int in [0, 100]; empty for results): ";
const CLOSING: &'static str = "closing...";

pub struct AppOptions {
    viewer_template: String,
    browser: bool,
    json: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        AppOptions {
            viewer_template: viewer::COLOR_VIEWER_URL.to_string(),
            browser: true,
            json: false,
        }
    }
}

impl AppOptions {

    /// Ignored unless the template has a `%s` slot for the hex string.
    pub fn set_viewer_template(&mut self, template: &str) -> bool {
        if template.contains("%s") {
            self.viewer_template = template.to_string();
            true
        } else {
            false
        }
    }

    pub fn set_browser(&mut self, browser: bool) {
        self.browser = browser;
    }

    pub fn set_json(&mut self, json: bool) {
        self.json = json;
    }
}


/// What the user asked for: two colors and the overlay transparencies.
#[derive(Debug)]
pub struct BlendRequest {
    pub base: Color,
    pub overlay: Color,
    pub transparencies: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendRecord {
    pub transparency: u8,
    pub alpha: f64,
    pub hex: String,
    pub rgb: [u8; 3],
}

impl BlendRequest {

    /// Composites the overlay over the base once per transparency; the
    /// first failure discards every result.
    pub fn compute(&self) -> Result<Vec<BlendRecord>, ColorError> {
        let mut overlay = self.overlay;
        self.transparencies.iter().map(|&transparency| {
            overlay.set_alpha(transparency as f64 / 100.0)?;
            let result = overlay.blend(&self.base)?;
            log::info!("{} over {} at {}% -> {}", overlay.hex(), self.base.hex(), transparency, result.hex());
            Ok(BlendRecord {
                transparency,
                alpha: overlay.alpha(),
                hex: result.hex(),
                rgb: result.rgb(),
            })
        }).collect()
    }
}


#[derive(Debug)]
enum SessionError {
    Io(io::Error),
    Rejected(ColorError),
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<ColorError> for SessionError {
    fn from(e: ColorError) -> Self {
        SessionError::Rejected(e)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => e.fmt(f),
            SessionError::Rejected(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SessionError {}


pub struct Application {
    options: AppOptions,
    viewer: Box<dyn Viewer>,
}

impl Application {

    pub fn new(options: AppOptions) -> Self {
        let viewer: Box<dyn Viewer> = if options.browser {
            Box::new(viewer::Browser)
        } else {
            Box::new(viewer::Disabled)
        };
        Application::with_viewer(options, viewer)
    }

    pub fn with_viewer(options: AppOptions, viewer: Box<dyn Viewer>) -> Self {
        Application {
            options,
            viewer,
        }
    }

    /// Runs one interactive session. `closing...` is written whatever
    /// happens; only i/o failures are returned as errors.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> GEResult<()> {
        let result = match self.session(input, output) {
            Ok(()) => Ok(()),
            Err(SessionError::Rejected(e)) => {
                log::debug!("session rejected: {}", e.kind());
                writeln!(output, "{}", e).map_err(SessionError::Io)
            },
            Err(e) => Err(e),
        };
        writeln!(output, "{}", CLOSING)?;
        output.flush()?;
        result.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }

    fn session<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<(), SessionError> {
        let request = read_request(input, output)?;
        let records = request.compute()?;
        for record in &records {
            self.report(record, output)?;
        }
        Ok(())
    }

    fn report<W: Write>(&self, record: &BlendRecord, output: &mut W) -> io::Result<()> {
        if self.options.json {
            let line = serde_json::to_string(record).map_err(io::Error::from)?;
            writeln!(output, "{}", line)?;
        } else {
            writeln!(output, "{}", record.hex)?;
        }
        let url = viewer::build_url(&self.options.viewer_template, &record.hex);
        if let Err(e) = self.viewer.open(&url) {
            log::warn!("unable to open {}: {}", url, e);
        }
        Ok(())
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> io::Result<String> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
    line.truncate(len);
    Ok(line)
}

/// Prompts for the two colors, then for transparencies until an empty
/// entry or end of input.
fn read_request<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<BlendRequest, SessionError> {
    let base = Color::from_hex(&prompt(input, output, BASE_PROMPT)?)?;
    let overlay = Color::from_hex(&prompt(input, output, OVERLAY_PROMPT)?)?;
    let mut transparencies = Vec::new();
    loop {
        let entry = prompt(input, output, TRANSPARENCY_PROMPT)?;
        if entry.is_empty() {
            break;
        }
        transparencies.push(parse_transparency(&entry)?);
    }
    Ok(BlendRequest {
        base,
        overlay,
        transparencies,
    })
}

pub fn parse_transparency(entry: &str) -> Result<u8, ColorError> {
    let value: i64 = entry.trim().parse()
        .map_err(|_| ColorError::InvalidFormat(format!("invalid transparency `{}`, must be an integer", entry)))?;
    if !(0..=100).contains(&value) {
        return Err(ColorError::InvalidRange("transparency must be between 0 and 100".to_string()));
    }
    Ok(value as u8)
}


#[cfg(test)]
mod test {

    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::AppOptions;
    use super::Application;
    use super::ColorError;
    use super::Viewer;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Viewer for Recorder {
        fn open(&self, url: &str) -> io::Result<()> {
            self.0.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct Broken;

    impl Viewer for Broken {
        fn open(&self, _url: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
        }
    }

    fn run_with(options: AppOptions, input: &str) -> (String, Vec<String>) {
        let recorder = Recorder::default();
        let app = Application::with_viewer(options, Box::new(recorder.clone()));
        let mut output = Vec::new();
        app.run(&mut input.as_bytes(), &mut output).unwrap();
        let urls = recorder.0.borrow().clone();
        (String::from_utf8(output).unwrap(), urls)
    }

    fn prompts(transparencies: usize) -> String {
        let mut s = String::from("base color in hex (include #): overlay color in hex (include #): ");
        for _ in 0..transparencies {
            s.push_str("transparency (int in [0, 100]; empty for results): ");
        }
        s
    }

    #[test]
    fn test_session_blends_each_transparency() {
        let (out, urls) = run_with(AppOptions::default(), "#000000\n#FFFFFF\n0\n50\n100\n\n");
        assert_eq!(out, format!("{}#000000\n#7f7f7f\n#ffffff\nclosing...\n", prompts(4)));
        assert_eq!(urls, vec![
            "https://miquelvir.github.io/color/#000000".to_string(),
            "https://miquelvir.github.io/color/#7f7f7f".to_string(),
            "https://miquelvir.github.io/color/#ffffff".to_string(),
        ]);
    }

    #[test]
    fn test_session_end_of_input_finishes_list() {
        let (out, urls) = run_with(AppOptions::default(), "#204060\r\n#a0c0e0\r\n25");
        assert_eq!(out, format!("{}#406080\nclosing...\n", prompts(2)));
        assert_eq!(urls.len(), 1);
    }

    #[test]
    fn test_session_without_transparencies() {
        let (out, urls) = run_with(AppOptions::default(), "#000\n#fff\n\n");
        assert_eq!(out, format!("{}closing...\n", prompts(1)));
        assert!(urls.is_empty());
    }

    #[test]
    fn test_session_invalid_hex() {
        let (out, urls) = run_with(AppOptions::default(), "000000\n#ffffff\n50\n\n");
        assert_eq!(out, "base color in hex (include #): invalid hex\nclosing...\n");
        assert!(urls.is_empty());
    }

    #[test]
    fn test_session_bad_transparency_discards_batch() {
        let (out, urls) = run_with(AppOptions::default(), "#000000\n#ffffff\n10\n101\n20\n\n");
        assert_eq!(out, format!("{}transparency must be between 0 and 100\nclosing...\n", prompts(2)));
        assert!(urls.is_empty());

        let (out, urls) = run_with(AppOptions::default(), "#000000\n#ffffff\n10\nhalf\n\n");
        assert_eq!(out, format!("{}invalid transparency `half`, must be an integer\nclosing...\n", prompts(2)));
        assert!(urls.is_empty());
    }

    #[test]
    fn test_session_json_and_template() {
        let mut options = AppOptions::default();
        options.set_json(true);
        assert!(!options.set_viewer_template("http://localhost/color"));
        assert!(options.set_viewer_template("http://localhost/color?hex=%s"));
        let (out, urls) = run_with(options, "#000000\n#ffffff\n50\n\n");
        assert_eq!(
            out,
            format!("{}{}\nclosing...\n", prompts(2), r##"{"transparency":50,"alpha":0.5,"hex":"#7f7f7f","rgb":[127,127,127]}"##)
        );
        assert_eq!(urls, vec!["http://localhost/color?hex=#7f7f7f".to_string()]);
    }

    #[test]
    fn test_viewer_failure_is_not_fatal() {
        let app = Application::with_viewer(AppOptions::default(), Box::new(Broken));
        let mut output = Vec::new();
        app.run(&mut "#000000\n#ffffff\n50\n\n".as_bytes(), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), format!("{}#7f7f7f\nclosing...\n", prompts(2)));
    }

    #[test]
    fn test_parse_transparency() {
        use super::parse_transparency;

        assert_eq!(parse_transparency("0"), Ok(0));
        assert_eq!(parse_transparency(" 100 "), Ok(100));
        assert_eq!(parse_transparency("-1").unwrap_err().kind(), "invalid range");
        assert_eq!(parse_transparency("1.5").unwrap_err().kind(), "invalid format");
        assert_eq!(
            parse_transparency("250"),
            Err(ColorError::InvalidRange("transparency must be between 0 and 100".to_string()))
        );
    }
}
