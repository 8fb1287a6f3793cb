//! Fixtures shaped like `react-native init` output

use std::path::Path;

pub const BUILD_GRADLE: &str = r#"apply plugin: "com.android.application"

import com.android.build.OutputFile

/**
 * The react.gradle file registers a task for each build variant (e.g. bundleDebugJsAndAssets
 * and bundleReleaseJsAndAssets).
 *
 * project.ext.react = [
 *   // the name of the generated asset file containing your JS bundle
 *   bundleAssetName: "index.android.bundle",
 *
 *   // the entry file for bundle generation
 *   entryFile: "index.android.js",
 * ]
 */

apply from: "../../node_modules/react-native/react.gradle"

def enableSeparateBuildPerCPUArchitecture = false

android {
    compileSdkVersion 23
    buildToolsVersion "23.0.1"
}
"#;

/// 0.60-0.70 layout: a live `project.ext.react` map before `apply from`
pub const BUILD_GRADLE_HERMES: &str = r#"apply plugin: "com.android.application"

import com.android.build.OutputFile

/**
 * project.ext.react = [
 *   // the entry file for bundle generation. If none specified and
 *   // "index.android.js" exists, it will be used. Otherwise "index.js" is
 *   // default. Can be overridden with ENTRY_FILE environment variable.
 *   entryFile: "index.android.js",
 * ]
 */

project.ext.react = [
    enableHermes: true,  // clean and rebuild if changing
]

apply from: "../../node_modules/react-native/react.gradle"

def enableHermes = project.ext.react.get("enableHermes", false);

android {
    compileSdkVersion rootProject.ext.compileSdkVersion
}
"#;

pub const BUILD_GRADLE_REACT_BLOCK: &str = r#"apply plugin: "com.android.application"
apply plugin: "com.facebook.react"

react {
    /* Folders */
    //   The root of your project, i.e. where "package.json" lives. Default is '..'
    // root = file("../")
    //   The file that is the entry point for the bundle
    // entryFile = file("../js/MyApplication.android.js")
}

android {
    namespace "com.awesomeproject"
}
"#;

pub const MAIN_APPLICATION_JAVA: &str = r#"package com.awesomeproject;

import android.app.Application;

import com.facebook.react.ReactApplication;
import com.facebook.react.ReactNativeHost;
import com.facebook.react.ReactPackage;
import com.facebook.react.shell.MainReactPackage;

import java.util.Arrays;
import java.util.List;

public class MainApplication extends Application implements ReactApplication {

  private final ReactNativeHost mReactNativeHost = new ReactNativeHost(this) {
    @Override
    public boolean getUseDeveloperSupport() {
      return BuildConfig.DEBUG;
    }

    @Override
    protected List<ReactPackage> getPackages() {
      return Arrays.<ReactPackage>asList(
          new MainReactPackage()
      );
    }
  };

  @Override
  public ReactNativeHost getReactNativeHost() {
    return mReactNativeHost;
  }
}
"#;

pub const MAIN_APPLICATION_JAVA_WITH_MODULE: &str = r#"package com.awesomeproject;

public class MainApplication extends Application implements ReactApplication {

  private final ReactNativeHost mReactNativeHost = new ReactNativeHost(this) {
    @Override
    public boolean getUseDeveloperSupport() {
      return BuildConfig.DEBUG;
    }

    @Override
    protected String getJSMainModuleName() {
      return "index";
    }
  };
}
"#;

pub const MAIN_APPLICATION_KT: &str = r#"package com.awesomeproject

class MainApplication : Application(), ReactApplication {

  override val reactNativeHost: ReactNativeHost =
      object : DefaultReactNativeHost(this) {
        override fun getJSMainModuleName(): String = "index"

        override fun getUseDeveloperSupport(): Boolean = BuildConfig.DEBUG
      }
}
"#;

pub const APP_DELEGATE_M: &str = r#"#import "AppDelegate.h"

#import <React/RCTBundleURLProvider.h>
#import <React/RCTRootView.h>

@implementation AppDelegate

- (BOOL)application:(UIApplication *)application didFinishLaunchingWithOptions:(NSDictionary *)launchOptions
{
  NSURL *jsCodeLocation;

  jsCodeLocation = [[RCTBundleURLProvider sharedSettings] jsBundleURLForBundleRoot:@"index.ios" fallbackResource:nil];

  RCTRootView *rootView = [[RCTRootView alloc] initWithBundleURL:jsCodeLocation
                                                      moduleName:@"AwesomeProject"
                                               initialProperties:nil
                                                   launchOptions:launchOptions];
  return YES;
}

@end
"#;

pub const APP_DELEGATE_SWIFT: &str = r#"import UIKit
import React

class ReactNativeDelegate: RCTDefaultReactNativeFactoryDelegate {
  override func bundleURL() -> URL? {
#if DEBUG
    RCTBundleURLProvider.sharedSettings().jsBundleURL(forBundleRoot: "index")
#else
    Bundle.main.url(forResource: "main", withExtension: "jsbundle")
#endif
  }
}
"#;

pub const PACKAGE_JSON: &str = r#"{
  "name": "AwesomeProject",
  "version": "0.0.1",
  "private": true,
  "scripts": {
    "start": "node node_modules/react-native/local-cli/cli.js start",
    "test": "jest"
  },
  "dependencies": {
    "react": "16.0.0",
    "react-native": "0.50.3"
  },
  "devDependencies": {
    "babel-jest": "21.2.0",
    "babel-preset-react-native": "4.0.0",
    "jest": "21.2.1",
    "react-test-renderer": "16.0.0"
  },
  "jest": {
    "preset": "react-native"
  }
}
"#;

/// Newer generators keep the Jest config in `jest.config.js`
pub const PACKAGE_JSON_MODERN: &str = r#"{
  "name": "AwesomeProject",
  "version": "0.0.1",
  "private": true,
  "scripts": {
    "android": "react-native run-android",
    "ios": "react-native run-ios",
    "lint": "eslint .",
    "start": "react-native start",
    "test": "jest"
  },
  "dependencies": {
    "react": "18.1.0",
    "react-native": "0.70.6"
  },
  "devDependencies": {
    "@babel/core": "^7.12.9",
    "babel-jest": "^26.6.3",
    "eslint": "^7.32.0",
    "jest": "^29.2.1",
    "react-test-renderer": "18.1.0"
  }
}
"#;

pub const APP_DELEGATE_MM: &str = r#"#import "AppDelegate.h"

#import <React/RCTBundleURLProvider.h>

@implementation AppDelegate

- (NSURL *)sourceURLForBridge:(RCTBridge *)bridge
{
#if DEBUG
  return [[RCTBundleURLProvider sharedSettings] jsBundleURLForBundleRoot:@"index"];
#else
  return [[NSBundle mainBundle] URLForResource:@"main" withExtension:@"jsbundle"];
#endif
}

@end
"#;

pub const GITIGNORE: &str = "# OSX\n.DS_Store\n\n# node.js\nnode_modules/\nnpm-debug.log\n";

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Lay out what `react-native init <name>` produces inside `working_dir`
pub fn write_generated_project(working_dir: &Path, name: &str) {
    let package = name.to_lowercase();
    write(&working_dir.join("package.json"), PACKAGE_JSON);
    write(&working_dir.join(".gitignore"), GITIGNORE);
    write(&working_dir.join(".flowconfig"), "[ignore]\n");
    write(
        &working_dir.join("index.android.js"),
        "import { AppRegistry } from 'react-native';\n",
    );
    write(
        &working_dir.join("index.ios.js"),
        "import { AppRegistry } from 'react-native';\n",
    );
    write(
        &working_dir.join("__tests__/index.android.js"),
        "it('renders correctly', () => {});\n",
    );
    write(
        &working_dir.join("android/app/build.gradle"),
        BUILD_GRADLE,
    );
    write(
        &working_dir
            .join("android/app/src/main/java/com")
            .join(&package)
            .join("MainApplication.java"),
        MAIN_APPLICATION_JAVA,
    );
    write(
        &working_dir.join("ios").join(name).join("AppDelegate.m"),
        APP_DELEGATE_M,
    );
}

/// Lay out what a 0.70-era `react-native init <name>` produces inside `working_dir`
pub fn write_modern_generated_project(working_dir: &Path, name: &str) {
    let package = name.to_lowercase();
    write(&working_dir.join("package.json"), PACKAGE_JSON_MODERN);
    write(&working_dir.join(".gitignore"), GITIGNORE);
    write(&working_dir.join("babel.config.js"), "module.exports = {};\n");
    write(
        &working_dir.join("jest.config.js"),
        "module.exports = {\n  preset: 'react-native',\n};\n",
    );
    write(
        &working_dir.join("index.js"),
        "import {AppRegistry} from 'react-native';\nimport App from './App';\n",
    );
    write(&working_dir.join("App.tsx"), "const App = () => null;\nexport default App;\n");
    write(
        &working_dir.join("__tests__/App.test.tsx"),
        "it('renders correctly', () => {});\n",
    );
    write(
        &working_dir.join("android/app/build.gradle"),
        BUILD_GRADLE_HERMES,
    );
    write(
        &working_dir
            .join("android/app/src/main/java/com")
            .join(&package)
            .join("MainApplication.java"),
        MAIN_APPLICATION_JAVA_WITH_MODULE,
    );
    write(
        &working_dir.join("ios").join(name).join("AppDelegate.mm"),
        APP_DELEGATE_MM,
    );
}
