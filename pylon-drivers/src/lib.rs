//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pylon-core for the lot's hardware:
//!
//! - HC-SR04 ultrasonic ranging (entry detection)
//! - Active-low IR reflective sensors (per-slot presence)
//! - Hobby servo PWM math (barrier actuation)
//! - GPIO indicator LEDs
//! - HD44780 16x2 LCD behind a PCF8574 I2C backpack

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod gpio;
pub mod sensor;
pub mod servo;
