
mod color;
mod application;
mod viewer;

use std::io;

use clap::App;
use clap::Arg;


const VERSION: &'static str = env!("CARGO_PKG_VERSION");
const AUTHORS: &'static str = env!("CARGO_PKG_AUTHORS");


fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app =
        App::new("alpha blender")
        .version(VERSION)
        .author(AUTHORS)
        .about("blend an overlay color onto a base color at several transparencies")
        .arg(
            Arg::with_name("viewer")
            .long("viewer")
            .help("viewer url template, `%s` is replaced by the hex color; default is \"miquelvir.github.io/color/%s\"")
            .takes_value(true)
        )
        .arg(
            Arg::with_name("no_browser")
            .long("no-browser")
            .help("print results without opening the viewer")
            .takes_value(false)
        )
        .arg(
            Arg::with_name("json")
            .long("json")
            .help("print one json object per result instead of the hex string")
            .takes_value(false)
        );

    let matches = app.get_matches();

    let options = {
        let mut options = application::AppOptions::default();
        if let Some(template) = matches.value_of("viewer") {
            if !options.set_viewer_template(template) {
                log::warn!("viewer template `{}` has no `%s`, use default", template);
            }
        }
        options.set_browser(!matches.is_present("no_browser"));
        options.set_json(matches.is_present("json"));
        options
    };

    let app = application::Application::new(options);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = app.run(&mut stdin.lock(), &mut stdout.lock()) {
        log::error!("session aborted: {}", e);
        std::process::exit(1);
    }
}
