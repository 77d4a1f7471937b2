use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "overpass-survey")]
#[command(about = "Fetch OpenStreetMap point features for an area and rate report photos")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: ./overpass-survey.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch point features from the Overpass API and save them as JSON and CSV
    Fetch {
        #[arg(
            short = 't',
            long,
            help = "Only fetch nodes carrying this tag key (e.g. 'amenity')"
        )]
        node_type: Option<String>,

        #[arg(long, help = "Area name to resolve (e.g. 'Albany')")]
        area: Option<String>,

        #[arg(long, help = "State the area belongs to")]
        state: Option<String>,

        #[arg(long, help = "Overpass interpreter URL")]
        url: Option<String>,

        #[arg(
            short,
            long,
            help = "JSON output path [default: {handle}_nodes.json]"
        )]
        json_output: Option<PathBuf>,

        #[arg(long, help = "CSV output path [default: {handle}_nodes.csv]")]
        csv_output: Option<PathBuf>,

        #[arg(short, long, help = "Number of sample nodes to print")]
        sample: Option<usize>,

        #[arg(long, default_value = "false", help = "Print the query and exit")]
        print_query: bool,
    },

    /// Rate how well a description matches a photo using Gemini
    AnalyzeImage {
        #[arg(short, long, default_value = "./pic.jpeg")]
        image: PathBuf,

        #[arg(short, long, default_value = "A pothole")]
        description: String,

        #[arg(short, long, default_value = "Road Damage")]
        obstacle_type: String,

        #[arg(long, help = "Gemini model name")]
        model: Option<String>,

        #[arg(long, default_value = "false", help = "Print the assessment as JSON")]
        json: bool,
    },

    /// Summarize a previously saved JSON node file
    Inspect {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "5")]
        sample: usize,

        #[arg(long, default_value = "false", help = "Fail on invalid records")]
        strict: bool,
    },
}
