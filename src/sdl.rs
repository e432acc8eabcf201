//! Watch a maze grow in a window.
//!
//! A mouse click runs one growth step, space runs the generator to completion, Q or closing the
//! window quits.

use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Point;
use sdl2::render::WindowCanvas;

use crate::generators::{GrowingSegments, StepOutcome};
use crate::renderers::{self, Colour, RenderOptions, WallLine};

fn sdl_colour(colour: Colour) -> Color {
    Color::RGB(colour[0], colour[1], colour[2])
}

fn draw(canvas: &mut WindowCanvas,
        generator: &GrowingSegments,
        options: &RenderOptions)
        -> Result<(), String> {

    canvas.set_draw_color(sdl_colour(options.background_colour()));
    canvas.clear();
    canvas.set_draw_color(sdl_colour(options.wall_colour()));

    let lines = renderers::wall_lines(&generator.snapshot_walls(), options).map_err(|e| e.to_string())?;
    for WallLine { from: (x1, y1), to: (x2, y2) } in lines {
        canvas.draw_line(Point::new(x1 as i32, y1 as i32), Point::new(x2 as i32, y2 as i32))?;
    }

    canvas.present();
    Ok(())
}

pub fn show_growth(generator: &mut GrowingSegments, options: &RenderOptions) -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let walls = generator.snapshot_walls();
    let (window_width, window_height) = renderers::image_dimensions(&walls, options)
        .map_err(|e| e.to_string())?;
    let window = video_subsystem.window("Growing segments", window_width, window_height)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;
    let mut canvas = window.into_canvas()
        .present_vsync()
        .accelerated()
        .build()
        .map_err(|e| e.to_string())?;

    let mut events = sdl_context.event_pump()?;
    let mut dirty = true;
    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } |
                Event::KeyDown { keycode: Some(Keycode::Q), .. } => break 'event,
                Event::MouseButtonDown { .. } if !generator.is_complete() => {
                    if let StepOutcome::Completed(axis) = generator.step().map_err(|e| e.to_string())? {
                        debug!("no {:?} segment left to grow", axis);
                    }
                    dirty = true;
                }
                Event::KeyDown { keycode: Some(Keycode::Space), .. } if !generator.is_complete() => {
                    let _ = generator.run_to_completion().map_err(|e| e.to_string())?;
                    dirty = true;
                }
                _ => continue,
            }
        }

        if dirty {
            draw(&mut canvas, generator, options)?;
            dirty = false;
        } else {
            canvas.present();
        }
    }

    Ok(())
}
