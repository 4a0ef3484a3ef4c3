//! Snake Kernel binary
//!
//! Bare metal (`target_os = "none"`): multiboot entry → serial logger → VGA
//! console + polled PS/2 keyboard + busy-wait clock → game loop, forever.
//!
//! Host: plays a short scripted session on a virtual screen and prints the
//! final frame, so the loop can be watched without an emulator.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod kernel {
    use core::fmt::Write;
    use core::panic::PanicInfo;

    use log::LevelFilter;
    use snake_kernel_lib::arch::x86::{halt_forever, keyboard::Ps2Keyboard, vga::VgaBuffer};
    use snake_kernel_lib::{logger, BusyWait, Color, ColorCode, Console, GameConfig, GameLoop};

    snake_kernel_lib::entry_point!(kernel_main);

    fn kernel_main() -> ! {
        logger::init(LevelFilter::Info);
        log::info!("snake kernel {} booting", env!("CARGO_PKG_VERSION"));

        let config = GameConfig::DEFAULT;

        // SAFETY: sole owner of the framebuffer and the i8042 from here on
        let mut console = Console::new(unsafe { VgaBuffer::new() });
        let keys = unsafe { Ps2Keyboard::new() };

        console.print_str("Snake Game Starting...\n", ColorCode::SNAKE);

        let clock = BusyWait::new(config.throttle_spins);
        match GameLoop::new(console, keys, clock, config) {
            Ok(mut game) => game.run(),
            Err(e) => {
                log::error!("invalid game config: {}", e);
                panic!("invalid game config: {}", e);
            }
        }
    }

    /// Log to serial, paint the whole screen red, halt.
    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        logger::log_panic(format_args!("{}", info));

        let color = ColorCode::new(Color::White, Color::Red);
        // SAFETY: the game loop never runs again
        let mut console = Console::new(unsafe { VgaBuffer::new() });
        console.clear(color);
        console.set_color(color);
        let _ = write!(console, "KERNEL PANIC\n{}\n", info);

        halt_forever()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    use snake_kernel_lib::{Console, GameConfig, GameLoop, NoDelay, Phase, ScanCode, ScriptedKeys};

    // faster pacing than the real kernel: one tick every few polls
    let config = GameConfig::DEFAULT.with_divisors(4, 6).with_throttle(0);

    let mut keys = ScriptedKeys::new();
    keys.idle(40)
        .push(ScanCode::W.code())
        .idle(30)
        .push(ScanCode::A.code())
        .idle(60)
        .push(ScanCode::S.code());

    let mut game = match GameLoop::new(Console::new(snake_kernel_lib::VirtualScreen::new()), keys, NoDelay::new(), config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("invalid game config: {}", e);
            std::process::exit(1);
        }
    };

    // play until the first crash, press Space, then watch the second game
    let mut steps = 0u32;
    while steps < 2_000 && game.step() == Phase::Running {
        steps += 1;
    }
    print_screen(game.console().sink());
    println!(
        "-- {} steps, {} ticks, score {}, {:?}",
        steps,
        game.ticks(),
        game.game().score(),
        game.phase()
    );

    game.keys_mut().push(ScanCode::Space.code());
    let restarted = game.step() == Phase::Running;
    for _ in 0..40 {
        game.step();
    }
    print_screen(game.console().sink());
    println!(
        "-- restarted: {}, {} ticks total, score {}, {:?}",
        restarted,
        game.ticks(),
        game.game().score(),
        game.phase()
    );
}

#[cfg(not(target_os = "none"))]
fn print_screen(screen: &snake_kernel_lib::VirtualScreen) {
    for row in 0..25 {
        println!("{}", String::from_utf8_lossy(&screen.row_bytes(row)).trim_end());
    }
}
