// stackviz: interactive call-stack visualizer

use std::io;
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use stackviz::config::Cli;
use stackviz::simulator::StackSimulator;
use stackviz::snapshot::EventLog;
use stackviz::ui::App;
use stackviz::ui::logger::CaptureLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let events = Arc::new(Mutex::new(EventLog::new()));
    if let Err(e) = CaptureLogger::new(Arc::clone(&events), cli.log_level).install() {
        eprintln!("Warning: Failed to install logger: {}", e);
    }

    log::info!(
        "stack starts at {}",
        cli.address_format().format(cli.start_address)
    );
    let simulator = StackSimulator::new(cli.start_address);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(simulator, cli.history_limit, events, cli.address_format());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
