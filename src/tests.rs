#[cfg(test)]
mod index_tests {
    use crate::core::PixelBuffer;

    #[test]
    fn test_1d_2d_round_trip() {
        for (w, h) in [(1, 1), (1, 9), (9, 1), (10, 10), (80, 25), (7, 13)] {
            let buffer = PixelBuffer::new(w, h);
            for i in 0..buffer.size() {
                let (x, y) = buffer.to_2d(i);
                assert!(x < w && y < h);
                assert_eq!(buffer.to_1d(x, y), i);
            }
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(buffer.to_2d(buffer.to_1d(x, y)), (x, y));
                }
            }
        }
    }
}

#[cfg(test)]
mod clipping_tests {
    use crate::core::{Color, Pixel, PixelBuffer, Texture};
    use crate::error::Error;

    const MARK: Pixel = Pixel::new('#', Color::Red, Color::Yellow);

    #[test]
    fn test_set_pixel_outside_leaves_buffer_unchanged() {
        let mut buffer = PixelBuffer::new(10, 10);
        let before = buffer.clone();

        for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 10), (10, 10), (i32::MIN, i32::MAX)] {
            buffer.set_pixel(x, y, MARK);
        }
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_set_pixel_inside_reads_back() {
        let mut buffer = PixelBuffer::new(10, 10);
        for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9), (4, 6)] {
            buffer.set_pixel(x, y, MARK);
            assert_eq!(buffer.get_pixel(x, y), Some(MARK));
        }
    }

    #[test]
    fn test_clip_policies_differ_between_buffer_and_texture() {
        let mut buffer = PixelBuffer::new(4, 4);
        let mut texture = Texture::new(4, 4);

        buffer.set_pixel(4, 4, MARK);
        assert!(buffer.pixels().iter().all(|p| *p == Pixel::EMPTY));

        let err = texture.set_pixel(4, 4, MARK).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { x: 4, y: 4, .. }));
    }

    #[test]
    fn test_rectangle_clipped_at_corner() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.set_rectangle(8, 8, 5, 5, MARK);

        for y in 0..10 {
            for x in 0..10 {
                let expected = if x >= 8 && y >= 8 { MARK } else { Pixel::EMPTY };
                assert_eq!(buffer.get_pixel(x, y), Some(expected), "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_rectangle_partially_left_of_origin() {
        let mut buffer = PixelBuffer::new(5, 5);
        buffer.set_rectangle(-2, -2, 4, 4, MARK);
        let marked = buffer.pixels().iter().filter(|p| **p == MARK).count();
        assert_eq!(marked, 4);
        assert_eq!(buffer.get_pixel(1, 1), Some(MARK));
        assert_eq!(buffer.get_pixel(2, 2), Some(Pixel::EMPTY));
    }

    #[test]
    fn test_empty_rectangle_draws_nothing() {
        let mut buffer = PixelBuffer::new(5, 5);
        buffer.set_rectangle(1, 1, 0, 3, MARK);
        buffer.set_rectangle(1, 1, -3, 3, MARK);
        assert!(buffer.pixels().iter().all(|p| *p == Pixel::EMPTY));
    }

    #[test]
    fn test_texture_blit_clipped_corner() {
        let mut texture = Texture::new(4, 4);
        texture.fill(MARK);
        let mut buffer = PixelBuffer::new(10, 10);

        buffer.set_texture(7, 7, &texture);

        for y in 0..10 {
            for x in 0..10 {
                let expected = if x >= 7 && y >= 7 { MARK } else { Pixel::EMPTY };
                assert_eq!(buffer.get_pixel(x, y), Some(expected), "cell ({x}, {y})");
            }
        }
        assert_eq!(buffer.get_pixel(10, 7), None);
        assert_eq!(buffer.pixels().iter().filter(|p| **p == MARK).count(), 9);
    }

    #[test]
    fn test_texture_blit_leaves_source_intact() {
        let mut texture = Texture::from_text(&["ab", "cd"], Color::Cyan, Color::Black);
        let before = texture.clone();
        let mut first = PixelBuffer::new(3, 3);
        let mut second = PixelBuffer::new(3, 3);

        first.set_texture(0, 0, &texture);
        second.set_texture(1, 1, &texture);

        assert_eq!(texture, before);
        assert_eq!(first.get_pixel(0, 0).map(|p| p.character), Some('a'));
        assert_eq!(second.get_pixel(2, 2).map(|p| p.character), Some('d'));

        texture.fill(Pixel::FULL);
        assert_eq!(first.get_pixel(0, 0).map(|p| p.character), Some('a'));
    }

    #[test]
    fn test_texture_blit_overwrites_destination() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.clear(MARK);
        buffer.set_texture(0, 0, &Texture::new(1, 1));
        assert_eq!(buffer.get_pixel(0, 0), Some(Pixel::EMPTY));
        assert_eq!(buffer.get_pixel(1, 0), Some(MARK));
    }
}

#[cfg(test)]
mod sweep_tests {
    use crate::config::SweepMode;
    use crate::core::{Color, Pixel, PixelBuffer, Shader};

    const MARK: Pixel = Pixel::new('*', Color::Green, Color::Black);

    fn mark_all() -> Shader {
        Shader::new(0, 0, i32::MAX, i32::MAX, |_x: i32, _y: i32, _p: Pixel| MARK)
    }

    #[test]
    fn test_full_clear_reaches_every_cell() {
        let mut buffer = PixelBuffer::new(6, 4);
        buffer.clear(MARK);
        assert!(buffer.pixels().iter().all(|p| *p == MARK));
    }

    #[test]
    fn test_skip_last_clear_leaves_final_cell() {
        let mut buffer = PixelBuffer::with_sweep(6, 4, SweepMode::SkipLast);
        buffer.clear(MARK);
        let (last, rest) = buffer.pixels().split_last().unwrap();
        assert!(rest.iter().all(|p| *p == MARK));
        assert_eq!(*last, Pixel::EMPTY);
    }

    #[test]
    fn test_full_shader_pass_reaches_every_cell() {
        let mut buffer = PixelBuffer::new(3, 3);
        buffer.apply_shader(&mark_all());
        assert_eq!(buffer.get_pixel(2, 2), Some(MARK));
    }

    #[test]
    fn test_skip_last_shader_pass_leaves_final_cell() {
        let mut buffer = PixelBuffer::with_sweep(3, 3, SweepMode::SkipLast);
        buffer.apply_shader(&mark_all());
        assert_eq!(buffer.get_pixel(1, 2), Some(MARK));
        assert_eq!(buffer.get_pixel(2, 2), Some(Pixel::EMPTY));
    }

    #[test]
    fn test_skip_last_on_single_cell_buffer() {
        let mut buffer = PixelBuffer::with_sweep(1, 1, SweepMode::SkipLast);
        buffer.clear(MARK);
        assert_eq!(buffer.sweep_len(), 0);
        assert_eq!(buffer.get(0), Some(Pixel::EMPTY));
    }

    #[test]
    fn test_direct_writes_ignore_sweep_mode() {
        let mut buffer = PixelBuffer::with_sweep(2, 2, SweepMode::SkipLast);
        buffer.set(3, MARK);
        buffer.set_rectangle(0, 0, 2, 2, MARK);
        assert!(buffer.pixels().iter().all(|p| *p == MARK));
    }
}

#[cfg(test)]
mod shader_tests {
    use crate::core::{Color, Pixel, PixelBuffer, Shader, Texture};

    fn highlight(_x: i32, _y: i32, p: Pixel) -> Pixel {
        p.with_colors(Color::Black, Color::Yellow)
    }

    #[test]
    fn test_inclusive_corner_is_shaded() {
        let mut buffer = PixelBuffer::new(5, 5);
        buffer.apply_shader(&Shader::new(0, 0, 2, 2, highlight));

        let shaded = Pixel::EMPTY.with_colors(Color::Black, Color::Yellow);
        assert_eq!(buffer.get_pixel(2, 2), Some(shaded));
        assert_eq!(buffer.get_pixel(0, 2), Some(shaded));
        assert_eq!(buffer.get_pixel(3, 3), Some(Pixel::EMPTY));
        assert_eq!(buffer.get_pixel(3, 2), Some(Pixel::EMPTY));

        // width 2 covers three columns
        let count = buffer.pixels().iter().filter(|p| **p == shaded).count();
        assert_eq!(count, 9);
    }

    #[test]
    fn test_shader_receives_current_pixel_and_coordinates() {
        let mut buffer = PixelBuffer::new(4, 1);
        buffer.set_string(0, 0, "abcd", Color::White, Color::Black);
        buffer.apply_shader(&Shader::new(1, 0, 1, 0, |x: i32, _y: i32, p: Pixel| {
            let upper = p.character.to_ascii_uppercase();
            if x == 2 { p.with_character('!') } else { p.with_character(upper) }
        }));

        let row: String = buffer.row(0).unwrap().iter().map(|p| p.character).collect();
        assert_eq!(row, "aB!d");
    }

    #[test]
    fn test_shaders_compose_in_application_order() {
        let mut texture = Texture::new(2, 1);
        texture.apply_shader(&Shader::new(0, 0, 1, 0, |_x: i32, _y: i32, p: Pixel| {
            p.with_character('1')
        }));
        texture.apply_shader(&Shader::new(1, 0, 0, 0, |_x: i32, _y: i32, p: Pixel| {
            p.with_character('2')
        }));
        assert_eq!(texture.get_pixel(0, 0).map(|p| p.character), Some('1'));
        assert_eq!(texture.get_pixel(1, 0).map(|p| p.character), Some('2'));
    }

    #[test]
    fn test_shader_with_captured_state() {
        let tint = Color::Magenta;
        let shader = Shader::new(0, 0, 0, 0, move |_x: i32, _y: i32, p: Pixel| {
            p.with_colors(tint, p.background)
        });
        assert_eq!(shader.execute(0, 0, Pixel::FULL).foreground, Color::Magenta);
        assert_eq!(shader.execute(1, 0, Pixel::FULL), Pixel::FULL);
    }
}

#[cfg(test)]
mod render_tests {
    use crate::config::{BlitStrategy, SweepMode, WindowConfig};
    use crate::core::{Color, Pixel, PixelBuffer};
    use crate::error::Error;
    use crate::surface::{Coord, MemorySurface};
    use crate::window::{BlitPath, FrameStatus, Window};
    use std::io;

    fn window(surface: MemorySurface, config: WindowConfig) -> Window<MemorySurface> {
        Window::new(surface, config).unwrap()
    }

    #[test]
    fn test_fast_path_end_to_end() {
        let config = WindowConfig::new("ok", 80, 25);
        let mut window = window(MemorySurface::new(), config);
        let mut buffer = PixelBuffer::new(80, 25);
        buffer.clear(Pixel::EMPTY);
        buffer.set_string(0, 0, "OK", Color::White, Color::Black);

        let status = window.render(&buffer).unwrap();
        assert_eq!(status, FrameStatus::Presented(BlitPath::Fast));

        let surface = window.surface();
        assert_eq!(surface.bulk_writes(), 1);
        assert_eq!(surface.cell_writes(), 0);

        let cells = surface.last_region().unwrap();
        assert_eq!(cells.len(), 80 * 25);
        assert_eq!((cells[0].character, cells[0].attributes), ('O', 0x0F));
        assert_eq!((cells[1].character, cells[1].attributes), ('K', 0x0F));
        assert_eq!(cells[0].foreground(), Some(Color::White));
        assert_eq!(cells[0].background(), Some(Color::Black));
        assert!(surface.row_text(0).unwrap().starts_with("OK "));
    }

    #[test]
    fn test_fast_path_ships_final_cell_under_skip_last() {
        let config = WindowConfig::new("t", 3, 2).with_sweep(SweepMode::SkipLast);
        let mut window = window(MemorySurface::new(), config.clone());
        let mut buffer = config.new_buffer();
        buffer.set_pixel(2, 1, Pixel::new('z', Color::Red, Color::Black));

        window.render(&buffer).unwrap();
        assert_eq!(window.surface().cell(2, 1).map(|c| c.character), Some('z'));
    }

    #[test]
    fn test_slow_path_writes_each_cell() {
        let config = WindowConfig::new("t", 4, 3);
        let mut window = window(MemorySurface::without_bulk_write(), config);
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.set_string(0, 2, "tail", Color::Gray, Color::DarkBlue);

        let status = window.render(&buffer).unwrap();
        assert_eq!(status, FrameStatus::Presented(BlitPath::Slow));

        let surface = window.surface();
        assert_eq!(surface.cell_writes(), 12);
        assert_eq!(surface.bulk_writes(), 0);
        assert_eq!(surface.row_text(2).as_deref(), Some("tail"));
        assert_eq!(
            surface.cell(3, 2).map(|c| c.attributes),
            Some(Pixel::new('l', Color::Gray, Color::DarkBlue).attributes())
        );
    }

    #[test]
    fn test_slow_path_skip_last_omits_final_cell() {
        let config = WindowConfig::new("t", 4, 3)
            .with_strategy(BlitStrategy::Slow)
            .with_sweep(SweepMode::SkipLast);
        let mut window = window(MemorySurface::new(), config.clone());
        let mut buffer = config.new_buffer();
        buffer.set_string(0, 2, "tail", Color::Gray, Color::DarkBlue);

        window.render(&buffer).unwrap();

        let surface = window.surface();
        assert_eq!(surface.cell_writes(), 11);
        assert_eq!(surface.row_text(2).as_deref(), Some("tai "));
    }

    #[test]
    fn test_slow_path_cursor_ends_after_last_cell() {
        let config = WindowConfig::new("t", 3, 2);
        let mut window = window(MemorySurface::without_bulk_write(), config);
        window.render(&PixelBuffer::new(3, 2)).unwrap();
        assert_eq!(window.cursor_position().unwrap(), Coord::new(3, 1));
    }

    #[test]
    fn test_transient_io_drops_frame_then_recovers() {
        let config = WindowConfig::new("t", 2, 2);
        let mut window = window(MemorySurface::new(), config);
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.clear(Pixel::FULL);

        window.surface_mut().fail_next(io::ErrorKind::Interrupted);
        assert_eq!(window.render(&buffer).unwrap(), FrameStatus::Dropped);
        assert_eq!(window.surface().bulk_writes(), 0);

        assert_eq!(
            window.render(&buffer).unwrap(),
            FrameStatus::Presented(BlitPath::Fast)
        );
        assert_eq!(window.surface().bulk_writes(), 1);
    }

    #[test]
    fn test_transient_failure_is_not_retried() {
        let config = WindowConfig::new("t", 2, 2).with_strategy(BlitStrategy::Slow);
        let mut window = window(MemorySurface::new(), config);
        let buffer = PixelBuffer::new(2, 2);

        window.render(&buffer).unwrap();
        let writes = window.surface().cell_writes();

        // hits the per-frame resize, before any cell is written
        window.surface_mut().fail_next(io::ErrorKind::Interrupted);
        assert_eq!(window.render(&buffer).unwrap(), FrameStatus::Dropped);
        assert_eq!(window.surface().cell_writes(), writes);
    }

    #[test]
    fn test_surface_too_small_drops_frame() {
        let config = WindowConfig::new("t", 4, 4);
        let surface = MemorySurface::new().with_max_extent(4, 4);
        let mut window = window(surface, config);
        let buffer = PixelBuffer::new(4, 4);
        assert!(matches!(
            window.render(&buffer),
            Ok(FrameStatus::Presented(BlitPath::Fast))
        ));

        window.surface_mut().set_max_extent(3, 3);
        assert_eq!(window.render(&buffer).unwrap(), FrameStatus::Dropped);

        window.surface_mut().set_max_extent(4, 4);
        assert_eq!(
            window.render(&buffer).unwrap(),
            FrameStatus::Presented(BlitPath::Fast)
        );
        assert_eq!(window.surface().bulk_writes(), 2);
    }

    #[test]
    fn test_extent_past_u16_drops_frame_on_both_paths() {
        let mut buffer = PixelBuffer::new(65537, 1);
        buffer.set_pixel(0, 0, Pixel::new('A', Color::White, Color::Black));
        buffer.set_pixel(65536, 0, Pixel::new('Z', Color::White, Color::Black));

        for strategy in [BlitStrategy::Slow, BlitStrategy::Fast] {
            let config = WindowConfig::new("wide", 65537, 1).with_strategy(strategy);
            let mut window = window(MemorySurface::new(), config);

            assert_eq!(window.render(&buffer).unwrap(), FrameStatus::Dropped);

            let surface = window.surface();
            assert_eq!(surface.cell_writes(), 0);
            assert_eq!(surface.bulk_writes(), 0);
            assert_eq!(surface.cell(0, 0).map(|c| c.character), Some(' '));
            assert_eq!(surface.cell(65536, 0).map(|c| c.character), Some(' '));
        }
    }

    #[test]
    fn test_geometry_mismatch_propagates() {
        let mut window = window(MemorySurface::new(), WindowConfig::new("t", 80, 25));
        let err = window.render(&PixelBuffer::new(80, 24)).unwrap_err();
        assert!(matches!(err, Error::GeometryMismatch { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_render_reasserts_surface_size() {
        use crate::surface::ConsoleSurface;

        let mut window = window(MemorySurface::new(), WindowConfig::new("t", 3, 3));
        window.surface_mut().resize(1, 1).unwrap();
        window.render(&PixelBuffer::new(3, 3)).unwrap();
        assert_eq!(window.surface().size(), (3, 3));
    }
}

#[cfg(test)]
mod registry_tests {
    use crate::config::WindowConfig;
    use crate::core::{BufferRegistry, Color, PixelBuffer};
    use crate::error::Error;
    use crate::surface::MemorySurface;
    use crate::window::Window;

    #[test]
    fn test_render_bound_buffer() {
        let config = WindowConfig::new("t", 5, 1);
        let mut registry = BufferRegistry::new();
        registry.insert(0, PixelBuffer::new(5, 1)).unwrap();
        registry.insert(1, config.new_buffer()).unwrap();

        registry.bind(1).unwrap();
        if let Some(buffer) = registry.bound_mut() {
            buffer.set_string(0, 0, "slot1", Color::White, Color::Black);
        }

        let mut window = Window::new(MemorySurface::new(), config).unwrap();
        let buffer = registry.bound().unwrap();
        window.render(buffer).unwrap();
        assert_eq!(window.surface().row_text(0).as_deref(), Some("slot1"));
    }

    #[test]
    fn test_bind_out_of_range() {
        let mut registry = BufferRegistry::new();
        assert!(matches!(registry.bind(65536), Err(Error::Range { index: 65536 })));
        assert!(matches!(registry.bind(usize::MAX), Err(Error::Range { .. })));
    }
}
