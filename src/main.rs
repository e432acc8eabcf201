use docopt::Docopt;
use error_chain::bail;
use log::info;
use segmaze::{
    generators::{GrowingSegments, GrowthOptionsBuilder},
    passages::PassageGraph,
    renderers,
    units::{ColumnLength, RowLength, TargetLength},
    walls::WallMap,
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Growing segments mazes

Usage:
    segmaze_driver -h | --help
    segmaze_driver [--width=<w>] [--height=<h>] [--target-length=<l>] [--seed=<s>] [--text-out=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--save-edges=<path>] [--screen-view]

Options:
    -h --help              Show this screen.
    --width=<w>            Number of cells in a row [default: 140].
    --height=<h>           Number of cells in a column [default: 80].
    --target-length=<l>    Segment length the generator favours when choosing what to grow [default: 5].
    --seed=<s>             Seed for the random choices, a random seed when not given.
    --text-out=<path>      Output file path for a textual rendering of the maze.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one cell wall in a maze [default: 10] max 255.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --screen-view          Show the maze growing in a window. Click to grow one step, space to finish, q to quit. Needs the sdl feature.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_target_length: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_save_edges: String,
    flag_screen_view: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            ImageSaveError(::image::ImageError);
            Generation(::segmaze::errors::GenerationError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut options_builder = GrowthOptionsBuilder::new()
        .row_length(RowLength(args.flag_width))
        .column_length(ColumnLength(args.flag_height))
        .target_length(TargetLength(args.flag_target_length));
    if let Some(seed) = args.flag_seed {
        options_builder = options_builder.seed(seed);
    }
    let options = options_builder.build();
    info!("growing a {} x {} maze with seed {}", args.flag_width, args.flag_height, options.seed());

    let mut generator = GrowingSegments::new(&options)?;

    let render_options = renderers::RenderOptionsBuilder::new()
        .cell_side_pixels_length(args.flag_cell_pixels)
        .build();

    if !args.flag_image_out.is_empty() || args.flag_screen_view {
        check_image_fits(&args, &render_options)?;
    }

    if args.flag_screen_view {
        show_on_screen(&mut generator, &render_options)?;
    }

    let _ = generator.run_to_completion()?;
    let walls = generator.snapshot_walls();

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&walls, &args.flag_save_edges)?;
    }

    if !args.flag_image_out.is_empty() {
        renderers::render_png(&walls, &render_options, &args.flag_image_out)
            .chain_err(|| format!("Failed to write maze to image file {}", args.flag_image_out))?;
    }

    if !args.flag_text_out.is_empty() {
        write_text_to_file(&format!("{}", walls), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    } else if args.flag_image_out.is_empty() && !args.flag_screen_view {
        println!("{}", walls);
    }

    Ok(())
}

#[cfg(feature = "sdl")]
fn show_on_screen(generator: &mut GrowingSegments,
                  render_options: &renderers::RenderOptions)
                  -> Result<()> {
    segmaze::sdl::show_growth(generator, render_options)?;
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn show_on_screen(_: &mut GrowingSegments, _: &renderers::RenderOptions) -> Result<()> {
    Err("--screen-view needs the driver built with the sdl feature".into())
}

fn check_image_fits(maze_args: &MazeArgs, render_options: &renderers::RenderOptions) -> Result<()> {
    let cell_pixels = render_options.cell_side_pixels_length();
    for &cells in &[maze_args.flag_width, maze_args.flag_height] {
        if renderers::pixel_extent(cells, cell_pixels).is_none() {
            bail!("A maze {} cells across at {} pixels per cell is too large for an image", cells, cell_pixels);
        }
    }
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(walls: &WallMap, file_path: &str) -> Result<()> {

    let passages = PassageGraph::from_walls(walls);

    let mut graph_data = String::new();
    graph_data.push_str(passages.size().0.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(passages.links_count().0.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in passages.iter_links() {
        let index_a = passages
            .grid_coordinate_to_index(src)
            .ok_or_else(|| format!("Link from {} is outside the maze", src))?;
        let index_b = passages
            .grid_coordinate_to_index(dst)
            .ok_or_else(|| format!("Link to {} is outside the maze", dst))?;

        graph_data.push_str((index_a + 1).to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str((index_b + 1).to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
