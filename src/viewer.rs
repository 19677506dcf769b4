use std::io;
use std::process::Command;
use std::process::Stdio;


pub const COLOR_VIEWER_URL: &'static str = "miquelvir.github.io/color/%s";

pub trait Viewer {

    fn open(&self, url: &str) -> io::Result<()>;

}

/// Substitutes `hex` into `template` and adds `https://` when the template
/// carries no scheme.
pub fn build_url(template: &str, hex: &str) -> String {
    let url = template.replacen("%s", hex, 1);
    if url.contains("://") {
        url
    } else {
        format!("https://{}", url)
    }
}


/// Hands the url to the platform's default browser.
pub struct Browser;

impl Viewer for Browser {

    fn open(&self, url: &str) -> io::Result<()> {
        let mut cmd = launcher(url);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd.spawn().map(|_| ())
    }
}

#[cfg(target_os = "windows")]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(&["/C", "start", "", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn launcher(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}


pub struct Disabled;

impl Viewer for Disabled {

    fn open(&self, url: &str) -> io::Result<()> {
        log::debug!("viewer disabled, skip {}", url);
        Ok(())
    }
}
