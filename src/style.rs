/*
 *   Copyright (c) 2024 the pickgrid authors
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use crossterm::style::{Attribute, Color, SetAttribute};

/// Opaque foreground/background/attribute bundle. The engine only carries it
/// around; it is applied exclusively by the [crate::Driver] implementation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg_color: Option<Color>,
    pub bg_color: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

/// The four style pairs a session uses: normal cells, the selected cell, the
/// static tips line, and the paging-tip line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StyleSheet {
    pub normal_style: Style,
    pub selected_style: Style,
    pub tips_style: Style,
    pub paging_style: Style,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let normal_style = Style::default();
        let selected_style = Style {
            fg_color: Some(Color::Rgb {
                r: 250,
                g: 250,
                b: 250,
            }),
            bg_color: Some(Color::Rgb {
                r: 39,
                g: 45,
                b: 239,
            }),
            ..Style::default()
        };
        let tips_style = Style {
            dim: true,
            ..Style::default()
        };
        let paging_style = Style {
            fg_color: Some(Color::Rgb {
                r: 94,
                g: 103,
                b: 111,
            }),
            ..Style::default()
        };
        StyleSheet {
            normal_style,
            selected_style,
            tips_style,
            paging_style,
        }
    }
}

impl StyleSheet {
    /// Monochrome sheet: the selected cell is marked by reverse video only.
    /// Useful on terminals with unreliable color support.
    pub fn plain() -> Self {
        StyleSheet {
            normal_style: Style::default(),
            selected_style: Style {
                reverse: true,
                ..Style::default()
            },
            tips_style: Style {
                dim: true,
                ..Style::default()
            },
            paging_style: Style {
                dim: true,
                ..Style::default()
            },
        }
    }
}

pub fn set_attribute(
    enable: bool,
    enable_attribute: Attribute,
    disable_attribute: Attribute,
) -> SetAttribute {
    match enable {
        true => SetAttribute(enable_attribute),
        false => SetAttribute(disable_attribute),
    }
}

#[macro_export]
macro_rules! apply_style {
    ($style: expr => fg_color) => {
        ::crossterm::style::SetForegroundColor(
            $style.fg_color.unwrap_or(::crossterm::style::Color::Reset),
        )
    };
    ($style: expr => bg_color) => {
        ::crossterm::style::SetBackgroundColor(
            $style.bg_color.unwrap_or(::crossterm::style::Color::Reset),
        )
    };
    ($style: expr => bold) => {
        $crate::style::set_attribute(
            $style.bold,
            ::crossterm::style::Attribute::Bold,
            ::crossterm::style::Attribute::NormalIntensity,
        )
    };
    ($style: expr => dim) => {
        $crate::style::set_attribute(
            $style.dim,
            ::crossterm::style::Attribute::Dim,
            ::crossterm::style::Attribute::NormalIntensity,
        )
    };
    ($style: expr => underline) => {
        $crate::style::set_attribute(
            $style.underline,
            ::crossterm::style::Attribute::Underlined,
            ::crossterm::style::Attribute::NoUnderline,
        )
    };
    ($style: expr => reverse) => {
        $crate::style::set_attribute(
            $style.reverse,
            ::crossterm::style::Attribute::Reverse,
            ::crossterm::style::Attribute::NoReverse,
        )
    };
}
